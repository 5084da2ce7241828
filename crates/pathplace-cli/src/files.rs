//! File-backed drawing source and scene sink.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pathplace::{
    DrawingSource, EsriPolyline, MeshInstance, PlacementError, Polyline, SceneSink,
    VecDrawingSource,
};

/// Polylines read from an Esri JSON geometry file.
pub struct SketchFile {
    inner: VecDrawingSource,
}

impl SketchFile {
    /// Read `path`; with `all_paths` every path is yielded, otherwise only
    /// the first.
    pub fn open(path: &Path, all_paths: bool) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading geometry {}", path.display()))?;
        let polylines = read_polylines(&json, all_paths)
            .with_context(|| format!("parsing geometry {}", path.display()))?;
        Ok(Self {
            inner: VecDrawingSource::new(polylines),
        })
    }
}

impl DrawingSource for SketchFile {
    fn next_polyline(&mut self) -> pathplace::Result<Option<Polyline>> {
        self.inner.next_polyline()
    }
}

/// Parse Esri polyline JSON into the polylines to place along.
pub fn read_polylines(json: &str, all_paths: bool) -> pathplace::Result<Vec<Polyline>> {
    let geometry = EsriPolyline::from_json(json)?;
    if all_paths {
        geometry.polylines()
    } else {
        Ok(vec![geometry.first_polyline()?])
    }
}

/// Buffers instances and writes them as one JSON array.
pub struct JsonSink<W: Write> {
    writer: W,
    instances: Vec<MeshInstance>,
}

impl<W: Write> JsonSink<W> {
    /// Sink writing to `writer` on [`Self::finish`].
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            instances: Vec::new(),
        }
    }

    /// Write the collected instances and hand back the writer.
    pub fn finish(mut self) -> Result<W> {
        serde_json::to_writer_pretty(&mut self.writer, &self.instances)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> SceneSink for JsonSink<W> {
    fn instantiate(&mut self, instance: MeshInstance) -> pathplace::Result<()> {
        if !instance.position.coords.iter().all(|c| c.is_finite()) {
            return Err(PlacementError::Sink(format!(
                "non-finite position for {}",
                instance.asset
            )));
        }
        self.instances.push(instance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathplace::{populate, PlacementConfig, SegmentPlacer};

    const SKETCH: &str = r#"{
        "hasZ": true,
        "paths": [
            [[0, 0, 10], [10, 0, 10]],
            [[0, 5, 0], [0, 9, 0]]
        ],
        "spatialReference": {"wkid": 3857}
    }"#;

    #[test]
    fn test_first_path_only_by_default() {
        assert_eq!(read_polylines(SKETCH, false).unwrap().len(), 1);
        assert_eq!(read_polylines(SKETCH, true).unwrap().len(), 2);
    }

    #[test]
    fn test_sketch_file_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.json");
        fs::write(&path, SKETCH).unwrap();

        let mut source = SketchFile::open(&path, false).unwrap();
        let mut sink = JsonSink::new(Vec::new());
        let placer = SegmentPlacer::new(PlacementConfig::default());
        let created = populate(&mut source, &mut sink, &placer, "wall.glb").unwrap();
        assert_eq!(created, 7);

        let bytes = sink.finish().unwrap();
        let parsed: Vec<MeshInstance> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.len(), 7);
        assert_eq!(parsed[1].position.z, 10.0);
        assert_eq!(parsed[1].rotation, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_file() {
        let err = SketchFile::open(Path::new("/nonexistent/sketch.json"), false)
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("reading geometry"));
    }
}

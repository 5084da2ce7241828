//! Collaborators on either side of the placer.
//!
//! A [`DrawingSource`] yields polylines as the user finishes drawing them; a
//! [`SceneSink`] turns each placement into a visible object. [`populate`]
//! connects the two through a [`SegmentPlacer`].

use std::collections::VecDeque;

use pathplace_math::{Point3, Transform};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::placer::{PlacementSpec, SegmentPlacer};
use crate::polyline::Polyline;

/// One object to add to a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshInstance {
    /// Asset to instantiate, e.g. a glTF URL.
    pub asset: String,
    /// Origin of the instance.
    pub position: Point3,
    /// Euler rotation in degrees, `[x, y, z]`; only z (heading) is ever set.
    pub rotation: [f64; 3],
    /// Column-major model matrix combining rotation and position.
    pub transform: [f64; 16],
    /// Segment of the source polyline.
    pub segment: usize,
}

impl MeshInstance {
    /// Instance of `asset` at a placement.
    pub fn from_placement(asset: impl Into<String>, placement: &PlacementSpec) -> Self {
        Self {
            asset: asset.into(),
            position: placement.position,
            rotation: [0.0, 0.0, placement.heading_degrees],
            transform: Transform::placement(&placement.position, placement.heading_degrees)
                .to_cols_array(),
            segment: placement.segment,
        }
    }
}

/// Produces polylines on user action.
pub trait DrawingSource {
    /// The next finished polyline, or `None` once the source is exhausted.
    fn next_polyline(&mut self) -> Result<Option<Polyline>>;
}

/// Accepts placements and instantiates a visual asset for each.
pub trait SceneSink {
    /// Add one instance to the scene.
    fn instantiate(&mut self, instance: MeshInstance) -> Result<()>;
}

/// In-memory queue of polylines.
#[derive(Debug, Clone, Default)]
pub struct VecDrawingSource {
    queue: VecDeque<Polyline>,
}

impl VecDrawingSource {
    /// Source yielding `polylines` in order.
    pub fn new(polylines: impl IntoIterator<Item = Polyline>) -> Self {
        Self {
            queue: polylines.into_iter().collect(),
        }
    }
}

impl DrawingSource for VecDrawingSource {
    fn next_polyline(&mut self) -> Result<Option<Polyline>> {
        Ok(self.queue.pop_front())
    }
}

/// Sink that keeps every instance it is given.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    /// Instances in arrival order.
    pub instances: Vec<MeshInstance>,
}

impl SceneSink for CollectingSink {
    fn instantiate(&mut self, instance: MeshInstance) -> Result<()> {
        self.instances.push(instance);
        Ok(())
    }
}

/// Drain `source`, place items along every polyline and hand one `asset`
/// instance per placement to `sink`.
///
/// Returns the number of instances created. Stops at the first error from
/// the source, the placer or the sink; instances already handed to the sink
/// stay there.
pub fn populate<S, K>(
    source: &mut S,
    sink: &mut K,
    placer: &SegmentPlacer,
    asset: &str,
) -> Result<usize>
where
    S: DrawingSource + ?Sized,
    K: SceneSink + ?Sized,
{
    let mut created = 0;
    let mut drawn = 0;
    while let Some(polyline) = source.next_polyline()? {
        let placements = placer.place(&polyline)?;
        info!(
            polyline = drawn,
            vertices = polyline.points.len(),
            instances = placements.len(),
            asset,
            "populating polyline"
        );
        for placement in &placements {
            sink.instantiate(MeshInstance::from_placement(asset, placement))?;
            created += 1;
        }
        drawn += 1;
    }
    Ok(created)
}

//! Points of interest and the marker seam they drive.

use glam::{Vec2, Vec3};

use crate::constants::PointConfig;
use crate::error::ConfigError;

/// An on-screen element that follows a point of interest.
pub trait Marker {
    fn set_visible(&mut self, visible: bool);
    /// Translation in pixels relative to the viewport centre (y down).
    fn set_translation(&mut self, offset: Vec2);
}

/// A fixed world-space point with its marker and per-frame screen state.
#[derive(Debug)]
pub struct PointOfInterest<M> {
    world_position: Vec3,
    pub marker: M,
    pub visible: bool,
    pub screen_offset: Vec2,
}

impl<M> PointOfInterest<M> {
    pub fn new(world_position: Vec3, marker: M) -> Self {
        Self {
            world_position,
            marker,
            visible: false,
            screen_offset: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }
}

/// The fixed set of points. Entries are created once and never added or removed.
#[derive(Debug)]
pub struct PointsOfInterest<M> {
    points: Vec<PointOfInterest<M>>,
}

impl<M: Marker> PointsOfInterest<M> {
    /// Build from configuration, resolving each marker by selector.
    ///
    /// Fails on the first selector that cannot be resolved.
    pub fn from_config(
        configs: &[PointConfig],
        mut resolve: impl FnMut(&str) -> Option<M>,
    ) -> Result<Self, ConfigError> {
        if configs.is_empty() {
            return Err(ConfigError::NoPoints);
        }
        let points = configs
            .iter()
            .enumerate()
            .map(|(index, cfg)| {
                let marker = resolve(cfg.selector).ok_or_else(|| ConfigError::MissingMarker {
                    index,
                    selector: cfg.selector.to_string(),
                })?;
                Ok(PointOfInterest::new(Vec3::from_array(cfg.position), marker))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        log::info!("[points] configured {} points of interest", points.len());
        Ok(Self { points })
    }

    pub fn from_points(points: Vec<PointOfInterest<M>>) -> Result<Self, ConfigError> {
        if points.is_empty() {
            return Err(ConfigError::NoPoints);
        }
        Ok(Self { points })
    }

    /// Put every marker into its initial hidden state.
    pub fn hide_all(&mut self) {
        for p in &mut self.points {
            p.visible = false;
            p.marker.set_visible(false);
        }
    }
}

impl<M> PointsOfInterest<M> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointOfInterest<M>> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PointOfInterest<M>> {
        self.points.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&PointOfInterest<M>> {
        self.points.get(index)
    }
}

impl<'a, M> IntoIterator for &'a PointsOfInterest<M> {
    type Item = &'a PointOfInterest<M>;
    type IntoIter = std::slice::Iter<'a, PointOfInterest<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

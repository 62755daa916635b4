//! Scenes laid end to end on the production timeline.

use crate::store::NodeStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    pub scene_id: String,
    pub title: String,
    /// Seconds from the start of the film.
    pub start: u32,
    pub duration: u32,
}

/// One segment per scene, in store order, each starting where the previous
/// one ends.
pub fn timeline_segments(store: &NodeStore) -> Vec<TimelineSegment> {
    let mut start = 0u32;
    store
        .scenes()
        .iter()
        .map(|scene| {
            let segment = TimelineSegment {
                scene_id: scene.id.clone(),
                title: scene.title.clone(),
                start,
                duration: scene.duration,
            };
            start = start.saturating_add(scene.duration);
            segment
        })
        .collect()
}

/// Total runtime in seconds.
pub fn total_runtime(store: &NodeStore) -> u32 {
    store
        .scenes()
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.duration))
}

/// `m:ss`, minutes unbounded.
pub fn format_runtime(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::model::Scene;
    use pretty_assertions::assert_eq;

    #[test]
    fn segments_follow_each_other() {
        let scenes = vec![
            Scene::new("s1", "Act I", 180),
            Scene::new("s2", "Act II", 95),
            Scene::new("s3", "Act III", 240),
        ];
        let store = NodeStore::new(scenes, Vec::new(), &CanvasConfig::default());
        let starts: Vec<u32> = timeline_segments(&store).iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 180, 275]);
        assert_eq!(total_runtime(&store), 515);
        assert_eq!(format_runtime(total_runtime(&store)), "8:35");
    }

    #[test]
    fn runtime_formatting() {
        assert_eq!(format_runtime(0), "0:00");
        assert_eq!(format_runtime(180), "3:00");
        assert_eq!(format_runtime(61), "1:01");
        assert_eq!(format_runtime(3725), "62:05");
    }
}

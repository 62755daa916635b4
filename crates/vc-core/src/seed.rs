//! Demo production loaded at startup.

use crate::config::CanvasConfig;
use crate::model::{Node, NodeKind, NodeStatus, Scene};
use crate::store::NodeStore;
use kurbo::Point;

pub const MASTER_TIMELINE_ID: &str = "master-timeline";

fn done(id: &str, kind: NodeKind, title: &str, description: &str) -> Node {
    Node::new(id, kind, title)
        .describe(description)
        .with_status(NodeStatus::Complete)
}

/// Act I: a single scene of script, cast, look, and media nodes.
pub fn demo_scenes() -> Vec<Scene> {
    let nodes = vec![
        // Scripts
        done("script1-master", NodeKind::Script, "Act I Master Script", "Complete first act screenplay")
            .at(100.0, 50.0)
            .connect(&["script1-1", "script1-2"])
            .with_thumbnail("nodes/film-script.jpg"),
        done("script1-1", NodeKind::Script, "Corporate Presentation", "Boardroom power dynamics")
            .at(450.0, 50.0)
            .connect(&["char1-1"])
            .with_thumbnail("nodes/film-script.jpg"),
        done("script1-2", NodeKind::Script, "Data Discovery", "Alira finds suspicious files")
            .at(450.0, 250.0)
            .connect(&["char1-1"])
            .with_thumbnail("nodes/film-script.jpg"),
        // Characters
        done("char1-1", NodeKind::Character, "Alira Chen", "Corporate Executive / The One")
            .at(800.0, 150.0)
            .connect(&["style1-1"])
            .with_thumbnail("nodes/executive-portrait.jpg"),
        done("char1-2", NodeKind::Character, "Board Members", "Corporate power structure")
            .at(800.0, 350.0)
            .connect(&["style1-1"])
            .with_thumbnail("nodes/executive-portrait.jpg"),
        // Look
        done("style1-1", NodeKind::Style, "Corporate Matrix Style", "Clean facade hiding digital truth")
            .at(1200.0, 250.0)
            .connect(&["light1-1"]),
        done("light1-1", NodeKind::Lighting, "Boardroom Lighting", "Sterile corporate illumination")
            .at(1600.0, 250.0)
            .connect(&["bg1-1"])
            .with_thumbnail("nodes/lighting-setup.jpg"),
        // Environment
        done("bg1-1", NodeKind::Background, "Corporate Boardroom", "Glass towers and city views")
            .at(2000.0, 250.0)
            .connect(&["cam1-1"])
            .with_thumbnail("nodes/boardroom-bg.jpg"),
        done("cam1-1", NodeKind::Camera, "Corporate Cameras", "Establishing and close-ups")
            .at(2400.0, 250.0)
            .connect(&["img1-1"])
            .with_thumbnail("nodes/camera-equipment.jpg"),
        // Media
        done("img1-1", NodeKind::Image, "Boardroom Sequence", "Corporate presentation visuals")
            .at(2800.0, 250.0)
            .connect(&["vid1-1"])
            .with_thumbnail("nodes/executive-portrait.jpg"),
        done("vid1-1", NodeKind::Video, "Act I Complete", "Full corporate sequence")
            .at(3200.0, 250.0),
        // Audio
        done("music1-1", NodeKind::Music, "Corporate Deception", "Orchestral with digital undertones")
            .at(2800.0, 450.0)
            .connect(&["vid1-1"])
            .with_thumbnail("nodes/audio-mixing.jpg"),
        done("voiceover1-1", NodeKind::Voiceover, "Alira's Dialogue", "Professional to questioning")
            .at(3200.0, 450.0)
            .connect(&["vid1-1"])
            .with_thumbnail("nodes/audio-mixing.jpg"),
    ];

    let mut scene = Scene::new("scene1", "Act I: Corporate Boardroom", 180);
    scene.color = "purple-500".into();
    scene.position = Point::new(200.0, 1400.0);
    scene.preview = Some("nodes/executive-portrait.jpg".into());
    scene.nodes = nodes;
    vec![scene]
}

/// The master timeline, outside every scene.
pub fn master_timeline() -> Node {
    done(
        MASTER_TIMELINE_ID,
        NodeKind::Timeline,
        "NEON MATRIX: Digital Awakening",
        "Complete feature film timeline",
    )
    .at(1800.0, 100.0)
}

pub fn demo_store(config: &CanvasConfig) -> NodeStore {
    NodeStore::new(demo_scenes(), vec![master_timeline()], config)
}

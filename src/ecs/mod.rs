use hecs::{Entity, World};

use crate::domain::plot::{Mutation, Site, label_color_for};

pub mod components;
pub mod systems;

use components::{CountLabel, Needle, NeedleHead, NeedleLine, Payload, SiteBox};

/// The created visual elements of one plot. Entities carry layout
/// components that the systems keep in sync with the viewport.
#[derive(Default)]
pub struct SceneGraph {
    pub world: World,
}

impl SceneGraph {
    /// Create a new empty scene graph.
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    /// Spawn a needle with its head. `overlap` is the number of heads at the
    /// same location; clusters get a count label.
    pub fn spawn_needle(&mut self, mutation: &Mutation, fill: Option<String>, overlap: usize) -> Entity {
        let count = (overlap > 1).then(|| CountLabel {
            text: overlap.to_string(),
            fill: label_color_for(fill.as_deref()).to_string(),
            font_size: 0.0,
            dx: 0.0,
            dy: 0.0,
        });
        let head = NeedleHead {
            key: mutation.head_key(),
            dx: 0.0,
            cy: 0.0,
            sy: 1.0,
            radius: 0.0,
            fill,
            count,
        };
        let needle = Needle {
            id: mutation.id,
            pos: mutation.pos,
            value: mutation.value,
            background: mutation.background,
        };
        let payload = Payload(serde_json::to_value(mutation).unwrap_or_default());
        self.world.spawn((needle, NeedleLine::default(), head, payload))
    }

    pub fn spawn_site(&mut self, index: usize, site: &Site) -> Entity {
        let site_box = SiteBox {
            index,
            start: site.start,
            end: site.end,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            stroke_width: 0.0,
            class: site.css_class(),
            marker: Default::default(),
        };
        let payload = Payload(serde_json::to_value(site).unwrap_or_default());
        self.world.spawn((site_box, payload))
    }

    pub fn needle_count(&self) -> usize {
        self.world.query::<&Needle>().iter().count()
    }

    pub fn site_count(&self) -> usize {
        self.world.query::<&SiteBox>().iter().count()
    }

    /// Tooltip payload of a needle, by mutation id.
    pub fn needle_payload(&self, id: usize) -> Option<serde_json::Value> {
        self.world
            .query::<(&Needle, &Payload)>()
            .iter()
            .find(|(_, (needle, _))| needle.id == id)
            .map(|(_, (_, payload))| payload.0.clone())
    }

    /// Tooltip payload of a site, by index.
    pub fn site_payload(&self, index: usize) -> Option<serde_json::Value> {
        self.world
            .query::<(&SiteBox, &Payload)>()
            .iter()
            .find(|(_, (site, _))| site.index == index)
            .map(|(_, (_, payload))| payload.0.clone())
    }

    /// Despawn every element.
    pub fn clear(&mut self) {
        self.world.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_clustered_heads_get_a_count_label() {
        let mut graph = SceneGraph::new();
        let single = graph.spawn_needle(&Mutation::new(10.0, 3.0), None, 1);
        let clustered = graph.spawn_needle(&Mutation::new(20.0, 3.0), Some("red".into()), 2);

        assert!(graph.world.get::<&NeedleHead>(single).map(|h| h.count.is_none()).unwrap_or(false));
        let head = graph.world.get::<&NeedleHead>(clustered).map(|h| (*h).clone()).ok();
        let label = head.and_then(|h| h.count);
        assert_eq!(label.map(|l| (l.text, l.fill)), Some(("2".to_string(), "white".to_string())));
        assert_eq!(graph.needle_count(), 2);
    }

    #[test]
    fn sites_keep_their_payload() {
        let mut graph = SceneGraph::new();
        graph.spawn_site(0, &Site::new(142.0, 167.0, "acetylation"));
        assert_eq!(graph.site_count(), 1);
        let payload = graph.site_payload(0).unwrap_or_default();
        assert_eq!(payload["type"], serde_json::json!(["acetylation"]));
        graph.clear();
        assert_eq!(graph.site_count(), 0);
    }
}

use std::collections::HashMap;

use super::scene::VisualHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverSource {
    Spatial,
    SideList,
}

#[derive(Clone, Debug)]
struct Hovered {
    id: String,
    source: HoverSource,
}

#[derive(Default)]
pub struct HoverSync {
    handles: HashMap<String, VisualHandle>,
    hovered: Option<Hovered>,
}

impl HoverSync {
    pub fn rebuild(&mut self, handles: impl IntoIterator<Item = (String, VisualHandle)>) {
        self.handles = handles.into_iter().collect();
        if let Some(hovered) = &self.hovered
            && !self.handles.contains_key(&hovered.id)
        {
            self.hovered = None;
        }
    }

    pub fn enter(&mut self, id: &str, source: HoverSource) {
        if !self.handles.contains_key(id) {
            return;
        }
        if let Some(hovered) = &mut self.hovered
            && hovered.id == id
        {
            hovered.source = source;
            return;
        }

        self.hovered = Some(Hovered {
            id: id.to_owned(),
            source,
        });
    }

    pub fn leave(&mut self, id: &str) {
        if self
            .hovered
            .as_ref()
            .is_some_and(|hovered| hovered.id == id)
        {
            self.hovered = None;
        }
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.hovered.as_ref().map(|hovered| hovered.id.as_str())
    }

    pub fn hovered_handle(&self) -> Option<VisualHandle> {
        let hovered = self.hovered.as_ref()?;
        self.handles.get(&hovered.id).copied()
    }

    pub fn overlay_open(&self) -> bool {
        self.hovered
            .as_ref()
            .is_some_and(|hovered| hovered.source == HoverSource::Spatial)
    }
}

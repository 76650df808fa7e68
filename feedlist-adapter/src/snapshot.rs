/// One item of the rendering payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleItem<K, C> {
    pub id: K,
    pub content: C,
    pub top: u64,
    pub height: u32,
    pub is_maximized: bool,
}

/// What the UI needs to render one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListSnapshot<K, C> {
    /// Items touching the overscanned viewport, in list order.
    pub visible_items: Vec<VisibleItem<K, C>>,
    pub total_height: u64,
    pub show_scroll_to_top: bool,
    pub maximized_id: Option<K>,
    /// `false` until the first dataset has been indexed; positions are estimates until then.
    pub is_initialized: bool,
}

impl<K, C> ListSnapshot<K, C> {
    pub fn visible_ids(&self) -> impl Iterator<Item = &K> {
        self.visible_items.iter().map(|item| &item.id)
    }

    pub fn is_empty(&self) -> bool {
        self.visible_items.is_empty()
    }
}

impl<K, C> Default for ListSnapshot<K, C> {
    fn default() -> Self {
        Self {
            visible_items: Vec::new(),
            total_height: 0,
            show_scroll_to_top: false,
            maximized_id: None,
            is_initialized: false,
        }
    }
}

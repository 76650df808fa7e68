use crate::Subscription;

/// An item as handed out by a [`DataSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem<K, C> {
    pub id: K,
    pub content: C,
}

impl<K, C> ListItem<K, C> {
    pub fn new(id: K, content: C) -> Self {
        Self { id, content }
    }
}

/// The external dataset behind a list.
///
/// The engine never caches content: it reads the ordered ids on every change notification and
/// fetches content by id when building a snapshot.
pub trait DataSource<K> {
    type Content: Clone;

    /// Registers `on_change`, to be called whenever the ordered set or any content changes.
    fn subscribe(&self, on_change: Box<dyn Fn()>) -> Subscription;

    fn ordered_ids(&self) -> Vec<K>;

    fn item_by_id(&self, id: &K) -> Option<ListItem<K, Self::Content>>;

    fn total_count(&self) -> usize {
        self.ordered_ids().len()
    }
}

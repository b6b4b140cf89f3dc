use shared::domain::Document;

/// The client-held authoritative document list. Created empty at session
/// start, replaced wholesale by refreshes, extended by uploads, and dropped
/// with the session. Only `QueryController` and `UploadController` write to
/// it; presentation reads snapshots.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards prior contents and installs `docs` verbatim, keeping the
    /// given order.
    pub fn replace_all(&mut self, docs: Vec<Document>) {
        self.documents = docs;
    }

    /// Appends `docs` after existing contents, keeping the given order. Does
    /// not deduplicate by id: the service is authoritative, and a repeated id
    /// produces a repeated row.
    pub fn append_all(&mut self, docs: Vec<Document>) {
        self.documents.extend(docs);
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Owned copy for readers that outlive the lock guard. A concurrent
    /// refresh may replace the list at any suspension point, so readers must
    /// not hold on to borrowed views across awaits.
    pub fn snapshot(&self) -> Vec<Document> {
        self.documents.clone()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::DocumentId;

    fn doc(id: i64, filename: &str) -> Document {
        Document::new(id, filename)
    }

    #[test]
    fn replace_all_discards_previous_contents() {
        let mut store = DocumentStore::new();
        store.replace_all(vec![doc(1, "a.txt"), doc(2, "b.txt")]);
        store.replace_all(vec![doc(9, "z.txt")]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.documents()[0].id, DocumentId::Number(9));
    }

    #[test]
    fn append_all_preserves_existing_order() {
        let mut store = DocumentStore::new();
        store.replace_all(vec![doc(1, "a.txt"), doc(2, "b.txt")]);
        store.append_all(vec![doc(3, "c.txt"), doc(4, "d.txt")]);

        let ids: Vec<_> = store.documents().iter().map(|d| d.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                DocumentId::Number(1),
                DocumentId::Number(2),
                DocumentId::Number(3),
                DocumentId::Number(4)
            ]
        );
    }

    #[test]
    fn append_all_keeps_duplicate_ids() {
        let mut store = DocumentStore::new();
        store.replace_all(vec![doc(1, "a.txt")]);
        store.append_all(vec![doc(1, "a.txt")]);

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn append_to_empty_store_behaves_like_replace() {
        let mut store = DocumentStore::new();
        store.append_all(vec![doc(5, "e.txt")]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.documents()[0].filename, "e.txt");
    }
}

/// A forum discussion; position in the list is its rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumDiscussion {
    pub title: String,
}

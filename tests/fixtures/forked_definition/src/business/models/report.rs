/// Kept for callers that predate the domain split.
#[derive(Clone, Debug, Default)]
pub struct Report {
    pub title: String,
}

use crate::store::Generation;

#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A batch was published to the store; read it back from there.
    BandsLoaded {
        generation: Generation,
        count: usize,
        enriched: usize,
    },
    /// `generation` is `None` when the request never left the input validation.
    SearchFailed {
        generation: Option<Generation>,
        reason: String,
    },
    Log(String),
}

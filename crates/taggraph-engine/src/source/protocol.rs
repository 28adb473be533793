use taggraph_core::Contact;

/// Messages from the background contact loader to the session.
#[derive(Debug, Clone)]
pub enum Incoming {
    /// One complete contact batch; triggers a full graph rebuild.
    Loaded(Vec<Contact>),
    /// The source failed; the session keeps whatever it already has.
    Error(String),
}

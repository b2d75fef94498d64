/// Per-operation state handed to every resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl RequestContext {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Bearer token of the inbound request, if the client sent one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

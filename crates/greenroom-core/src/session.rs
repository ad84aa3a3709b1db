/// Session state handed to the engine by the auth collaborator.
///
/// The credential is opaque to the engine; it is only forwarded on requests.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub credential: String,
    pub joined: bool,
}

impl Session {
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            joined: false,
        }
    }

    pub fn join(&mut self) {
        self.joined = true;
    }

    pub fn leave(&mut self) {
        self.joined = false;
    }
}

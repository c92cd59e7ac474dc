// Entry Domain Model

/// One immutable payload held by a queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    payload: Box<[u8]>,
}

impl Entry {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into().into_boxed_slice(),
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload.into_vec()
    }
}

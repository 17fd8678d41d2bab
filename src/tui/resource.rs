/// State of data a step loads from the backend.
///
/// `E` defaults to `String` so failures can travel inside `Clone` messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource<T, E = String> {
    NotAsked,
    Loading,
    Success(T),
    Failure(E),
}

impl<T, E> Resource<T, E> {
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(e) => Resource::Failure(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Resource::Failure(_))
    }
}

impl<T, E> Default for Resource<T, E> {
    fn default() -> Self {
        Resource::NotAsked
    }
}

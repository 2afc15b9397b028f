use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("User not authorized")]
    NotOwner,
}

/// Entities that carry an owning user, set once at creation.
pub trait Owned {
    const KIND: &'static str;

    fn owner_id(&self) -> Uuid;
}

/// Gate for every update/delete: the entity must exist and belong to the
/// caller.
pub fn assert_owner<T: Owned>(entity: Option<T>, caller: Uuid) -> Result<T, OwnershipError> {
    let entity = entity.ok_or(OwnershipError::NotFound(T::KIND))?;
    if entity.owner_id() != caller {
        return Err(OwnershipError::NotOwner);
    }
    Ok(entity)
}

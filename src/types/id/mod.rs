use std::{
    fmt::{Debug, Display},
    hash::Hash,
    marker::PhantomData,
    num::NonZeroU64,
};
use thiserror::Error;

use self::marker::{BoatMarker, Marker, PrincipalMarker};

pub mod marker;

pub type BoatId = Id<BoatMarker>;
pub type PrincipalId = Id<PrincipalMarker>;

/// Store-generated record identifier, always positive. The marker
/// keeps boat ids and principal ids from being mixed up.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id<T: Marker> {
    value: NonZeroU64,
    phantom: PhantomData<T>,
}

impl<T: Marker> Id<T> {
    /// Returns `None` for zero, which no store ever hands out.
    #[must_use]
    pub const fn new_checked(n: u64) -> Option<Self> {
        match NonZeroU64::new(n) {
            Some(value) => Some(Self {
                value,
                phantom: PhantomData,
            }),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.value.get()
    }
}

#[cfg(test)]
impl<T: Marker> Id<T> {
    #[track_caller]
    pub(crate) fn new(n: u64) -> Self {
        Self::new_checked(n).expect("value is zero")
    }
}

impl<T: Marker> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME.trim_end_matches("Marker"), self.value)
    }
}

impl<T: Marker> Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl<T: Marker> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: Marker> serde::Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.value.get())
    }
}

#[derive(Debug, Error)]
#[error("id {0} does not fit into BIGINT")]
struct IdOutOfRange(u64);

#[derive(Debug, Error)]
#[error("stored id {0} is not positive")]
struct NonPositiveId(i64);

// Ids live in BIGINT columns.
impl<'q, T: Marker> sqlx::Encode<'q, sqlx::Postgres> for Id<T> {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::database::HasArguments<'q>>::ArgumentBuffer,
    ) -> sqlx::encode::IsNull {
        match i64::try_from(self.value.get()) {
            Ok(value) => <i64 as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&value, buf),
            Err(..) => {
                tracing::warn!("{}", IdOutOfRange(self.value.get()));
                sqlx::encode::IsNull::Yes
            }
        }
    }
}

impl<'r, T: Marker> sqlx::Decode<'r, sqlx::Postgres> for Id<T> {
    fn decode(
        value: <sqlx::Postgres as sqlx::database::HasValueRef<'r>>::ValueRef,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <i64 as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        u64::try_from(raw)
            .ok()
            .and_then(Self::new_checked)
            .ok_or_else(|| Box::new(NonPositiveId(raw)) as sqlx::error::BoxDynError)
    }
}

impl<T: Marker> sqlx::Type<sqlx::Postgres> for Id<T> {
    fn type_info() -> <sqlx::Postgres as sqlx::Database>::TypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

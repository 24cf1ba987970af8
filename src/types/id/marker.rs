use crate::internal::Sealed;

macro_rules! markers {
    { $( $(#[$meta:meta])* $ident:ident, )* } => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $ident;
        impl Sealed for $ident {}
        impl Marker for $ident {
            const NAME: &'static str = stringify!($ident);
        }
    )*};
}

markers! {
    /// Identifies a boat record.
    BoatMarker,
    /// Identifies an authenticatable principal.
    PrincipalMarker,
}

/// Kind of record an [`Id`](super::Id) points at.
pub trait Marker: Sealed {
    /// Shown by the `Debug` output of an id.
    const NAME: &'static str;
}

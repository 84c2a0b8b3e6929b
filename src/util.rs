pub(crate) mod tracing_wrappers {
    #[cfg(feature = "tracing")]
    pub(crate) use tracing::{debug, trace};

    #[cfg(not(feature = "tracing"))]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[cfg(not(feature = "tracing"))]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[cfg(not(feature = "tracing"))]
    pub(crate) use {debug, trace};
}

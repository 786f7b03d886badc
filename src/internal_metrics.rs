use std::sync::atomic::{AtomicUsize, Ordering};

macro_rules! metrics {
    (
        $pub_container:ident {
            $internal_container:ident {
                $(
                    $(#[$meta:meta])*
                    $metric:ident: $ty:ident -> $pub_ty:ident,
                )*
            }
        }
    ) => {
        #[derive(Default)]
        pub(crate) struct $internal_container {
            $(
                $(#[$meta])*
                pub(crate) $metric: $ty,
            )*
        }

        impl $internal_container {
            pub fn sample(&self) -> $pub_container {
                let $internal_container { $($metric),* } = self;

                $pub_container {
                    $(
                        $metric: $metric.sample(),
                    )*
                }
            }
        }

        /**
        A sample of the self-diagnostics of a [`crate::MetricsEncoder`].
        */
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        #[non_exhaustive]
        pub struct $pub_container {
            $(
                $(#[$meta])*
                pub $metric: $pub_ty,
            )*
        }
    };
}

#[derive(Default)]
pub(crate) struct Counter(AtomicUsize);

impl Counter {
    pub fn increment(&self) {
        self.increment_by(1);
    }

    pub fn increment_by(&self, by: usize) {
        self.0.fetch_add(by, Ordering::Relaxed);
    }

    pub fn sample(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

metrics!(
    EncoderMetrics {
        InternalMetrics {
            /**
            A request was encoded.
            */
            request_encoded: Counter -> usize,
            /**
            A request failed to encode.
            */
            request_encode_failed: Counter -> usize,
            /**
            The total number of bytes produced by encoded requests.
            */
            request_encoded_bytes: Counter -> usize,
        }
    }
);

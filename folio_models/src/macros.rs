macro_rules! nutype_string {
    ($(#[doc=$doc:literal])* $ident:ident($($args:tt)*)) => {
        $(#[doc=$doc])*
        #[::nutype::nutype(
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Hash,
                Deref,
                TryFrom,
                Display,
                Serialize,
                Deserialize
            ),
            $($args)*
        )]
        pub struct $ident(String);
    };
}

pub(crate) use nutype_string;

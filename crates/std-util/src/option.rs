#[macro_export]
macro_rules! assert_none {
    ($e:expr) => {
        match $e {
            None => (),
            actual => panic!("expected `None`; actual={:?}", actual),
        }
    };
}

#[macro_export]
macro_rules! assert_some {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            actual => panic!("expected `Some`; actual={:?}", actual),
        }
    };
}

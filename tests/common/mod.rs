use proptest::prelude::*;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(mut i: I, mut j: J)
where
    I::Item: std::fmt::Debug + Eq,
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

/// The smallest height a binary tree with `len` nodes can have.
#[allow(dead_code)]
pub(super) fn minimal_height(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

/// Installs a log subscriber honoring `RUST_LOG`, once per test binary.
#[allow(dead_code)]
pub(super) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub(super) type U16Pairs = Vec<(u16, u16)>;

#[allow(dead_code)]
pub(super) fn u16_pairs(
    keys: std::ops::Range<u16>,
    len: std::ops::Range<usize>,
) -> impl Strategy<Value = U16Pairs> {
    prop::collection::vec((keys, 0u16..1024), len)
}

#[allow(dead_code)]
/// Few distinct keys, so that most insertions overwrite.
pub(super) fn dense_int_pairs() -> impl Strategy<Value = U16Pairs> {
    u16_pairs(0..64, 0..256)
}

#[allow(dead_code)]
pub(super) fn small_int_pairs() -> impl Strategy<Value = U16Pairs> {
    u16_pairs(0..1024, 0..512)
}

#[allow(dead_code)]
pub(super) fn string_u16_pairs() -> impl Strategy<Value = Vec<(String, u16)>> {
    prop::collection::vec(("[a-z]{0,2}", 0u16..1024u16), 0..512)
}

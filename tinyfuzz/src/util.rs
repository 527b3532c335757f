use rand_core::RngCore;

/// Fills the first `len` bytes of `data` with pseudorandom bytes drawn from `rng`.
///
/// Bytes past `len` are left untouched, and nothing already in the buffer is
/// read. Consumes exactly one `fill_bytes` call per invocation.
///
/// # Panics
///
/// Panics if `len` exceeds `data.len()`.
pub fn fill_buffer<R: RngCore + ?Sized>(rng: &mut R, data: &mut [u8], len: usize) {
    rng.fill_bytes(&mut data[..len]);
}

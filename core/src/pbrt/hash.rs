//! Hashing

/// Scrambles the bits of a 64-bit value so nearby inputs map to unrelated
/// outputs.
///
/// * `v` - The value.
#[inline]
pub fn mix_bits(mut v: u64) -> u64 {
    v ^= v >> 31;
    v = v.wrapping_mul(0x7fb5d329728ea185);
    v ^= v >> 27;
    v = v.wrapping_mul(0x81dadef4bc2dd44d);
    v ^= v >> 33;
    v
}

/// MurmurHash64A of a byte slice.
///
/// * `key`  - Bytes to hash.
/// * `seed` - Hash seed.
pub fn murmur_hash_64a(key: &[u8], seed: u64) -> u64 {
    const M: u64 = 0xc6a4a7935bd1e995;
    const R: u32 = 47;

    let mut h = seed ^ (key.len() as u64).wrapping_mul(M);

    let mut chunks = key.chunks_exact(8);
    for chunk in &mut chunks {
        let mut k = u64::from_le_bytes([
            chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
        ]);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);

        h ^= k;
        h = h.wrapping_mul(M);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        for (i, b) in tail.iter().enumerate().rev() {
            h ^= (*b as u64) << (8 * i);
        }
        h = h.wrapping_mul(M);
    }

    h ^= h >> R;
    h = h.wrapping_mul(M);
    h ^= h >> R;
    h
}

/// Hashes a sequence of 64-bit values.
///
/// * `values` - The values to hash.
pub fn hash_values(values: &[u64]) -> u64 {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    murmur_hash_64a(&bytes, 0)
}

/// Returns the `i`-th element of a pseudo-random permutation of `[0, l)`
/// selected by `p`.
///
/// * `i` - Index into the permutation.
/// * `l` - Length of the permutation.
/// * `p` - Permutation seed.
pub fn permutation_element(mut i: u32, l: u32, p: u32) -> u32 {
    debug_assert!(l > 0);

    let mut w = l - 1;
    w |= w >> 1;
    w |= w >> 2;
    w |= w >> 4;
    w |= w >> 8;
    w |= w >> 16;

    loop {
        i ^= p;
        i = i.wrapping_mul(0xe170893d);
        i ^= p >> 16;
        i ^= (i & w) >> 4;
        i ^= p >> 8;
        i = i.wrapping_mul(0x0929eb3f);
        i ^= p >> 23;
        i ^= (i & w) >> 1;
        i = i.wrapping_mul(1 | p >> 27);
        i = i.wrapping_mul(0x6935fa69);
        i ^= (i & w) >> 11;
        i = i.wrapping_mul(0x74dcb303);
        i ^= (i & w) >> 2;
        i = i.wrapping_mul(0x9e501cc3);
        i ^= (i & w) >> 2;
        i = i.wrapping_mul(0xc860a3df);
        i &= w;
        i ^= i >> 5;
        if i < l {
            break;
        }
    }

    ((i as u64 + p as u64) % l as u64) as u32
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hash_values_is_deterministic_and_order_sensitive() {
        assert_eq!(hash_values(&[1, 2, 3]), hash_values(&[1, 2, 3]));
        assert_ne!(hash_values(&[1, 2, 3]), hash_values(&[3, 2, 1]));
    }

    #[test]
    fn murmur_hash_handles_tail_bytes() {
        assert_ne!(murmur_hash_64a(&[1, 2, 3], 0), murmur_hash_64a(&[1, 2, 4], 0));
        assert_ne!(murmur_hash_64a(&[], 0), murmur_hash_64a(&[], 1));
    }

    proptest! {
        #[test]
        fn permutation_element_is_a_permutation(l in 1_u32..200, p in any::<u32>()) {
            let mut seen = vec![false; l as usize];
            for i in 0..l {
                let e = permutation_element(i, l, p);
                prop_assert!(e < l);
                prop_assert!(!seen[e as usize]);
                seen[e as usize] = true;
            }
        }
    }
}

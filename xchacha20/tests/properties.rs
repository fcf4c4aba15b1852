//! Property tests for the XChaCha20 construction and payload format
#![cfg(feature = "alloc")]

use proptest::prelude::*;
use xchacha20::{
    Error, RandomSource, Result, XNONCE_SIZE, decrypt, encrypt_with, open, seal, xchacha20,
    xchacha20_in_place,
};

/// Hands out a fixed nonce, standing in for the OS generator.
struct FixedNonce([u8; XNONCE_SIZE]);

impl RandomSource for FixedNonce {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        dest.copy_from_slice(&self.0[..dest.len()]);
        Ok(())
    }
}

fn bit_distance(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

proptest! {
    #[test]
    fn round_trip(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        message in proptest::collection::vec(any::<u8>(), 0..600),
    ) {
        let payload = seal(&mut FixedNonce(nonce), &message, &key).unwrap();
        prop_assert_eq!(&payload[message.len()..], &nonce[..]);
        prop_assert_eq!(open(&payload, &key).unwrap(), message.clone());

        let encoded = encrypt_with(&mut FixedNonce(nonce), &message, &key).unwrap();
        prop_assert_eq!(decrypt(&encoded, &key).unwrap(), message);
    }

    #[test]
    fn length_preservation(
        key in any::<[u8; 32]>(),
        message in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        let payload = seal(&mut FixedNonce([7; 24]), &message, &key).unwrap();
        prop_assert_eq!(payload.len(), message.len() + XNONCE_SIZE);

        let out = xchacha20(&key, &[7; 24], &message, 0).unwrap();
        prop_assert_eq!(out.len(), message.len());
    }

    #[test]
    fn deterministic(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        data in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        prop_assert_eq!(
            xchacha20(&key, &nonce, &data, 0).unwrap(),
            xchacha20(&key, &nonce, &data, 0).unwrap()
        );
    }

    #[test]
    fn counter_advance(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        head in proptest::collection::vec(any::<u8>(), 64),
        tail in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let mut whole = head.clone();
        whole.extend_from_slice(&tail);
        let whole = xchacha20(&key, &nonce, &whole, 0).unwrap();

        let first = xchacha20(&key, &nonce, &head, 0).unwrap();
        let second = xchacha20(&key, &nonce, &tail, 1).unwrap();

        prop_assert_eq!(&whole[..64], &first[..]);
        prop_assert_eq!(&whole[64..], &second[..]);
    }

    #[test]
    fn in_place_matches_allocating(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        counter in any::<u32>(),
        data in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        let mut buf = data.clone();
        xchacha20_in_place(&key, &nonce, counter, &mut buf);
        prop_assert_eq!(xchacha20(&key, &nonce, &data, counter).unwrap(), buf);
    }

    #[cfg(feature = "cipher")]
    #[test]
    fn stream_object_wraps_like_in_place(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        counter in (u32::MAX - 3)..=u32::MAX,
        data in proptest::collection::vec(any::<u8>(), 0..400),
    ) {
        use xchacha20::{XChaCha20, cipher::{KeyIvInit, StreamCipher, StreamCipherSeek}};

        let mut expected = data.clone();
        xchacha20_in_place(&key, &nonce, counter, &mut expected);

        let mut cipher = XChaCha20::new(&key.into(), &nonce.into());
        cipher.seek(u64::from(counter) * 64);
        let mut buf = data;
        prop_assert!(cipher.try_apply_keystream(&mut buf).is_ok());
        prop_assert_eq!(buf, expected);
    }

    #[test]
    fn single_bit_avalanche(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        key_bit in 0..256usize,
        nonce_bit in 0..192usize,
    ) {
        let zeros = [0u8; 256];
        let base = xchacha20(&key, &nonce, &zeros, 0).unwrap();

        let mut flipped_key = key;
        flipped_key[key_bit / 8] ^= 1 << (key_bit % 8);
        let by_key = xchacha20(&flipped_key, &nonce, &zeros, 0).unwrap();

        let mut flipped_nonce = nonce;
        flipped_nonce[nonce_bit / 8] ^= 1 << (nonce_bit % 8);
        let by_nonce = xchacha20(&key, &flipped_nonce, &zeros, 0).unwrap();

        // 2048 output bits: roughly half should change, far outside this
        // window only with negligible probability
        for other in [by_key, by_nonce] {
            let distance = bit_distance(&base, &other);
            prop_assert!((768..=1280).contains(&distance), "distance {}", distance);
        }
    }

    #[test]
    fn rejects_wrong_key_length(
        key in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(key.len() != 32);
        let expected = Err(Error::InvalidKeyLength { expected: 32, actual: key.len() });

        prop_assert_eq!(seal(&mut FixedNonce([0; 24]), b"msg", &key), expected.clone());
        prop_assert_eq!(open(&[0u8; 40], &key), expected);
    }
}

#[cfg(feature = "getrandom")]
#[test]
fn encrypt_uses_fresh_nonces() {
    let key = [0x24u8; 32];
    let a = xchacha20::encrypt("same message", &key).unwrap();
    let b = xchacha20::encrypt("same message", &key).unwrap();

    assert_ne!(a, b);
    assert_eq!(xchacha20::decrypt_to_string(&a, &key).unwrap(), "same message");
    assert_eq!(xchacha20::decrypt_to_string(&b, &key).unwrap(), "same message");
}

#[cfg(feature = "getrandom")]
#[test]
fn empty_message_payload() {
    use base64ct::{Base64, Encoding};

    let key = [0u8; 32];
    let encoded = xchacha20::encrypt("", &key).unwrap();

    assert_eq!(Base64::decode_vec(&encoded).unwrap().len(), XNONCE_SIZE);
    assert!(decrypt(&encoded, &key).unwrap().is_empty());
}

#[test]
fn concurrent_callers() {
    let key = [0x42u8; 32];
    let handles: Vec<_> = (0u8..8)
        .map(|i| {
            std::thread::spawn(move || {
                let message = vec![i; 1000];
                let payload = seal(&mut FixedNonce([i; 24]), &message, &key).unwrap();
                assert_eq!(open(&payload, &key).unwrap(), message);
                payload
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let payload = handle.join().unwrap();
        assert_eq!(&payload[1000..], &[i as u8; 24][..]);
    }
}

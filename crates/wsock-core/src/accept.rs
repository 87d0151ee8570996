//! Accept-key derivation for the opening handshake (RFC 6455 §4.2.2).
//!
//! The client's `Sec-WebSocket-Key` is concatenated with the protocol
//! GUID, hashed with SHA-1, and the raw digest bytes are base64-encoded.
//! Deterministic, infallible, no I/O.

/// The GUID every WebSocket server appends to the client key before
/// hashing (RFC 6455 §4.2.2).
pub const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// Compute the `Sec-WebSocket-Accept` value for a client key.
///
/// The key is used exactly as it appeared on the wire; it is not
/// base64-decoded or otherwise validated here. Same input always yields
/// the same output.
#[must_use]
pub fn derive_accept_key(client_key: &str) -> String {
    let mut seed = Vec::with_capacity(client_key.len() + WS_GUID.len());
    seed.extend_from_slice(client_key.as_bytes());
    seed.extend_from_slice(WS_GUID.as_bytes());
    base64_encode(&sha1(&seed))
}

// =============================================================================
// SHA-1 (RFC 3174) - minimal implementation
// =============================================================================

fn sha1(data: &[u8]) -> [u8; 20] {
    let mut state: [u32; 5] = [
        0x6745_2301,
        0xEFCD_AB89,
        0x98BA_DCFE,
        0x1032_5476,
        0xC3D2_E1F0,
    ];

    let bit_len = (data.len() as u64) * 8;
    let mut padded = Vec::with_capacity((data.len() + 9).div_ceil(64) * 64);
    padded.extend_from_slice(data);
    padded.push(0x80);
    while padded.len() % 64 != 56 {
        padded.push(0);
    }
    padded.extend_from_slice(&bit_len.to_be_bytes());

    for block in padded.chunks_exact(64) {
        let mut schedule = [0u32; 80];
        for (i, word) in schedule.iter_mut().take(16).enumerate() {
            *word = u32::from_be_bytes([
                block[i * 4],
                block[i * 4 + 1],
                block[i * 4 + 2],
                block[i * 4 + 3],
            ]);
        }
        for i in 16..80 {
            schedule[i] =
                (schedule[i - 3] ^ schedule[i - 8] ^ schedule[i - 14] ^ schedule[i - 16])
                    .rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = state;

        for (round, &word) in schedule.iter().enumerate() {
            let (mix, constant): (u32, u32) = match round {
                0..=19 => ((b & c) | (!b & d), 0x5A82_7999),
                20..=39 => (b ^ c ^ d, 0x6ED9_EBA1),
                40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1B_BCDC),
                _ => (b ^ c ^ d, 0xCA62_C1D6),
            };
            let next = a
                .rotate_left(5)
                .wrapping_add(mix)
                .wrapping_add(e)
                .wrapping_add(constant)
                .wrapping_add(word);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = next;
        }

        state[0] = state[0].wrapping_add(a);
        state[1] = state[1].wrapping_add(b);
        state[2] = state[2].wrapping_add(c);
        state[3] = state[3].wrapping_add(d);
        state[4] = state[4].wrapping_add(e);
    }

    let mut digest = [0u8; 20];
    for (i, word) in state.iter().enumerate() {
        digest[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
    }
    digest
}

// =============================================================================
// Base64 (RFC 4648) - encode only; the handshake never decodes
// =============================================================================

const B64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn base64_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let mut word = 0u32;
        for (i, &byte) in chunk.iter().enumerate() {
            word |= u32::from(byte) << (16 - 8 * i);
        }
        for i in 0..=chunk.len() {
            out.push(B64[((word >> (18 - 6 * i)) & 0x3F) as usize] as char);
        }
        for _ in chunk.len()..3 {
            out.push('=');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sha1_empty_input() {
        let digest = sha1(b"");
        let expected: [u8; 20] = [
            0xda, 0x39, 0xa3, 0xee, 0x5e, 0x6b, 0x4b, 0x0d, 0x32, 0x55, 0xbf, 0xef, 0x95, 0x60,
            0x18, 0x90, 0xaf, 0xd8, 0x07, 0x09,
        ];
        assert_eq!(digest, expected);
    }

    #[test]
    fn sha1_abc() {
        let digest = sha1(b"abc");
        let expected: [u8; 20] = [
            0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78, 0x50,
            0xc2, 0x6c, 0x9c, 0xd0, 0xd8, 0x9d,
        ];
        assert_eq!(digest, expected);
    }

    #[test]
    fn base64_known_vectors() {
        assert_eq!(base64_encode(b""), "");
        assert_eq!(base64_encode(b"f"), "Zg==");
        assert_eq!(base64_encode(b"fo"), "Zm8=");
        assert_eq!(base64_encode(b"foo"), "Zm9v");
        assert_eq!(base64_encode(b"foob"), "Zm9vYg==");
        assert_eq!(base64_encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn accept_key_rfc_vector() {
        // RFC 6455 §4.2.2 reference vector
        let accept = derive_accept_key("dGhlIHNhbXBsZSBub25jZQ==");
        assert_eq!(accept, "s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
    }

    #[test]
    fn accept_key_uses_raw_header_value() {
        // The key is hashed as-is; surrounding whitespace changes the result.
        let trimmed = derive_accept_key("dGhlIHNhbXBsZSBub25jZQ==");
        let padded = derive_accept_key(" dGhlIHNhbXBsZSBub25jZQ== ");
        assert_ne!(trimmed, padded);
    }

    proptest! {
        #[test]
        fn accept_key_is_deterministic(key in "[ -~]{0,64}") {
            prop_assert_eq!(derive_accept_key(&key), derive_accept_key(&key));
        }

        #[test]
        fn base64_output_shape(data in proptest::collection::vec(any::<u8>(), 0..128)) {
            let encoded = base64_encode(&data);
            prop_assert_eq!(encoded.len(), data.len().div_ceil(3) * 4);
            prop_assert!(encoded.bytes().all(|b| B64.contains(&b) || b == b'='));
        }
    }
}

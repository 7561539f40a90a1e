//! Key schedule and the 16-round Feistel core.

use crate::tables::{permute, E, FP, IP, P, PC1, PC2, ROTATIONS, SBOXES};

const ROUNDS: usize = 16;
const HALF_MASK: u64 = 0xFFFF_FFFF;
const HALF28_MASK: u64 = 0x0FFF_FFFF;

/// A cipher session: the 16 round subkeys derived from one 64-bit key.
///
/// Sessions are immutable after construction and hold no per-block state, so
/// one session can encrypt and decrypt any number of blocks, in any order,
/// from any number of threads. Two sessions built from the same key behave
/// identically.
#[derive(Clone)]
pub struct Des {
    subkeys: [u64; ROUNDS],
}

impl Des {
    /// Derives the round subkeys for `key` and returns a ready session.
    ///
    /// Only 56 bits of the key carry material; the low bit of each key byte
    /// is a parity bit and is discarded unchecked.
    pub fn new(key: u64) -> Self {
        Des {
            subkeys: derive_subkeys(key),
        }
    }

    /// Returns a fresh random 64-bit key.
    pub fn generate_random_key() -> u64 {
        rand::random()
    }

    /// Encrypts one 64-bit block.
    pub fn encrypt_u64(&self, block: u64) -> u64 {
        let permuted = permute(block, 64, &IP);
        let mut l = permuted >> 32;
        let mut r = permuted & HALF_MASK;

        for &subkey in self.subkeys.iter() {
            let next = l ^ round_fn(r, subkey);
            l = r;
            r = next;
        }

        permute((l << 32) | r, 64, &FP)
    }

    /// Decrypts one 64-bit block.
    ///
    /// Runs the rounds with the subkeys in reverse order and the half-update
    /// mirrored, undoing [`Des::encrypt_u64`] round by round.
    pub fn decrypt_u64(&self, block: u64) -> u64 {
        let permuted = permute(block, 64, &IP);
        let mut l = permuted >> 32;
        let mut r = permuted & HALF_MASK;

        for &subkey in self.subkeys.iter().rev() {
            let next = r ^ round_fn(l, subkey);
            r = l;
            l = next;
        }

        permute((l << 32) | r, 64, &FP)
    }

    /// Encrypts one 8-byte block, interpreted most-significant-byte first.
    pub fn encrypt_block(&self, block: [u8; 8]) -> [u8; 8] {
        self.encrypt_u64(u64::from_be_bytes(block)).to_be_bytes()
    }

    /// Decrypts one 8-byte block, interpreted most-significant-byte first.
    pub fn decrypt_block(&self, block: [u8; 8]) -> [u8; 8] {
        self.decrypt_u64(u64::from_be_bytes(block)).to_be_bytes()
    }
}

fn rotl28(half: u64, count: u32) -> u64 {
    ((half << count) | (half >> (28 - count))) & HALF28_MASK
}

/// Derives the 16 round subkeys, round 1 first.
///
/// The rotation of round n applies on top of round n-1's already-rotated
/// halves, so the schedule is a single cumulative scan over the rounds.
fn derive_subkeys(key: u64) -> [u64; ROUNDS] {
    let compressed = permute(key, 64, &PC1);
    let mut c = (compressed >> 28) & HALF28_MASK;
    let mut d = compressed & HALF28_MASK;

    let mut subkeys = [0u64; ROUNDS];
    for (round, subkey) in subkeys.iter_mut().enumerate() {
        c = rotl28(c, ROTATIONS[round]);
        d = rotl28(d, ROTATIONS[round]);
        *subkey = permute((c << 28) | d, 56, &PC2);
    }
    subkeys
}

/// The round function: expand, mix with the subkey, substitute, permute.
///
/// Each 6-bit group indexes its substitution box directly, and the final
/// block skips the half-swap before the output permutation, so ciphertext is
/// not interchangeable with standard DES implementations.
fn round_fn(half: u64, subkey: u64) -> u64 {
    let mixed = permute(half, 32, &E) ^ subkey;

    let mut substituted = 0u64;
    for (i, sbox) in SBOXES.iter().enumerate() {
        let group = (mixed >> (42 - 6 * i as u32)) & 0x3F;
        substituted = (substituted << 4) | sbox[group as usize] as u64;
    }

    permute(substituted, 32, &P)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: u64 = 0x0011_2233_4455_6677;
    const PLAINTEXT: u64 = 0x0F1E_2D3C_4B5A_6978;
    const CIPHERTEXT: u64 = 0x5D6F_C5A1_9D18_BC5C;

    #[test]
    fn subkey_schedule_frozen() {
        let subkeys = derive_subkeys(KEY);
        assert_eq!(subkeys[0], 0x7030_E450_2307);
        assert_eq!(subkeys[1], 0x009C_7434_8145);
        assert_eq!(subkeys[15], 0x6032_0817_22C2);
        for &subkey in &subkeys {
            assert!(subkey < (1 << 48), "subkey wider than 48 bits");
        }
    }

    #[test]
    fn known_answer() {
        let cipher = Des::new(KEY);
        assert_eq!(cipher.encrypt_u64(PLAINTEXT), CIPHERTEXT);
        assert_eq!(cipher.decrypt_u64(CIPHERTEXT), PLAINTEXT);
    }

    #[test]
    fn known_answer_second_key() {
        let cipher = Des::new(0x1334_5779_9BBC_DFF1);
        assert_eq!(cipher.encrypt_u64(0x0123_4567_89AB_CDEF), 0xB47C_E718_AA28_1BBC);
        assert_eq!(cipher.decrypt_u64(0xB47C_E718_AA28_1BBC), 0x0123_4567_89AB_CDEF);
    }

    #[test]
    fn roundtrip_multiple_values() {
        let cipher = Des::new(0xDEAD_BEEF_CAFE_BABE);
        let values = [
            0u64,
            1,
            u64::MAX,
            0x0123_4567_89AB_CDEF,
            0x8000_0000_0000_0000,
            0x5555_5555_5555_5555,
        ];
        for &plaintext in &values {
            let ciphertext = cipher.encrypt_u64(plaintext);
            assert_ne!(plaintext, ciphertext, "block {:#x} unchanged", plaintext);
            assert_eq!(cipher.decrypt_u64(ciphertext), plaintext);
        }
    }

    #[test]
    fn sessions_from_same_key_agree() {
        let a = Des::new(0x1122_3344_5566_7788);
        let b = Des::new(0x1122_3344_5566_7788);
        let ciphertext = a.encrypt_u64(PLAINTEXT);
        assert_eq!(b.encrypt_u64(PLAINTEXT), ciphertext);
        assert_eq!(b.decrypt_u64(ciphertext), PLAINTEXT);
    }

    #[test]
    fn key_bit_sensitivity() {
        let baseline = Des::new(KEY).encrypt_u64(PLAINTEXT);
        // Bit 1 of the last key byte carries material; flipping it must move
        // the ciphertext.
        assert_eq!(Des::new(KEY ^ 0x2).encrypt_u64(PLAINTEXT), 0xB8EE_96FA_6B3F_846E);
        assert_ne!(Des::new(KEY ^ 0x2).encrypt_u64(PLAINTEXT), baseline);
        assert_ne!(Des::new(KEY ^ (1 << 57)).encrypt_u64(PLAINTEXT), baseline);
    }

    #[test]
    fn parity_bits_carry_no_material() {
        // The low bit of every key byte is dropped by the schedule, so
        // flipping all eight of them yields the same session.
        let baseline = Des::new(KEY).encrypt_u64(PLAINTEXT);
        assert_eq!(Des::new(KEY ^ 0x1).encrypt_u64(PLAINTEXT), baseline);
        assert_eq!(
            Des::new(KEY ^ 0x0101_0101_0101_0101).encrypt_u64(PLAINTEXT),
            baseline
        );
    }

    #[test]
    fn plaintext_avalanche() {
        let cipher = Des::new(KEY);
        let baseline = cipher.encrypt_u64(PLAINTEXT);
        let flipped = cipher.encrypt_u64(PLAINTEXT ^ 1);
        assert_eq!(flipped, 0x2E72_C7B5_6248_F886);
        assert!((baseline ^ flipped).count_ones() > 1);
    }

    #[test]
    fn byte_block_interface_is_big_endian() {
        let cipher = Des::new(KEY);
        let block = PLAINTEXT.to_be_bytes();
        assert_eq!(cipher.encrypt_block(block), CIPHERTEXT.to_be_bytes());
        assert_eq!(cipher.decrypt_block(CIPHERTEXT.to_be_bytes()), block);
    }
}

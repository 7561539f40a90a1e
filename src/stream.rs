//! Stream framer: block framing, padding and the ECB pipeline.
//!
//! The framer is the only component with I/O side effects. Each 8-byte block
//! is ciphered independently (no chaining, no IV), so identical plaintext
//! blocks produce identical ciphertext blocks anywhere in the stream. That
//! property, and the padding heuristic on the decrypt side, are preserved
//! deliberately for compatibility with existing streams.

use std::io::{self, Read, Write};

use rayon::prelude::*;

use crate::cipher::Des;
use crate::error::DesError;

/// Fixed cipher block size in bytes.
pub const BLOCK_SIZE: usize = 8;

/// Encrypts `input` to `output`, one 8-byte block at a time.
///
/// The final chunk of `n` plaintext bytes (`0 <= n < 8`) is completed with
/// the byte value `8 - n` repeated `8 - n` times, so a plaintext whose
/// length is already a multiple of 8 (the empty stream included) gains one
/// full block of eight `0x08` bytes. Ciphertext length is therefore always
/// a positive multiple of 8. Returns the number of ciphertext bytes written.
pub fn encrypt_stream<R: Read, W: Write>(
    cipher: &Des,
    mut input: R,
    mut output: W,
) -> Result<u64, DesError> {
    let mut block = [0u8; BLOCK_SIZE];
    let mut consumed = 0u64;
    let mut written = 0u64;

    loop {
        let n = read_block(&mut input, &mut block, consumed)?;
        consumed += n as u64;

        let pad = (BLOCK_SIZE - n) as u8;
        for byte in &mut block[n..] {
            *byte = pad;
        }

        let ciphered = cipher.encrypt_block(block);
        output.write_all(&ciphered).map_err(|source| DesError::Write {
            offset: written,
            source,
        })?;
        written += BLOCK_SIZE as u64;

        if n < BLOCK_SIZE {
            break;
        }
    }

    log::debug!("encrypted {} plaintext bytes into {} ciphertext bytes", consumed, written);
    Ok(written)
}

/// Decrypts `input` to `output`, stripping the padding of the final block.
///
/// Blocks are decrypted independently, but emission lags one block behind
/// the reads so the last block can be identified and unpadded before it is
/// written. A ciphertext whose length is zero or not a multiple of 8 yields
/// [`DesError::MalformedLength`]. Returns the number of plaintext bytes
/// written.
pub fn decrypt_stream<R: Read, W: Write>(
    cipher: &Des,
    mut input: R,
    mut output: W,
) -> Result<u64, DesError> {
    let mut block = [0u8; BLOCK_SIZE];
    let mut lookahead: Option<[u8; BLOCK_SIZE]> = None;
    let mut consumed = 0u64;
    let mut written = 0u64;

    loop {
        let n = read_block(&mut input, &mut block, consumed)?;
        if n == 0 {
            break;
        }
        if n < BLOCK_SIZE {
            return Err(DesError::MalformedLength {
                length: consumed + n as u64,
            });
        }
        consumed += BLOCK_SIZE as u64;

        let plain = cipher.decrypt_block(block);
        if let Some(previous) = lookahead.replace(plain) {
            output.write_all(&previous).map_err(|source| DesError::Write {
                offset: written,
                source,
            })?;
            written += BLOCK_SIZE as u64;
        }
    }

    let last = lookahead.ok_or(DesError::MalformedLength { length: 0 })?;
    let keep = unpadded_len(&last);
    output.write_all(&last[..keep]).map_err(|source| DesError::Write {
        offset: written,
        source,
    })?;
    written += keep as u64;

    log::debug!("decrypted {} ciphertext bytes into {} plaintext bytes", consumed, written);
    Ok(written)
}

/// Encrypts an in-memory slice, fanning blocks out across the rayon pool.
///
/// Same framing contract as [`encrypt_stream`]; blocks are independent, so
/// they are ciphered in parallel and reassembled in input order.
pub fn encrypt_slice(cipher: &Des, plaintext: &[u8]) -> Vec<u8> {
    let pad = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(plaintext.len() + pad);
    padded.extend_from_slice(plaintext);
    padded.resize(plaintext.len() + pad, pad as u8);

    padded
        .par_chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            cipher.encrypt_block(block)
        })
        .collect::<Vec<[u8; BLOCK_SIZE]>>()
        .concat()
}

/// Decrypts an in-memory slice, fanning blocks out across the rayon pool.
///
/// The length is validated up front, so a malformed ciphertext produces no
/// partial output at all.
pub fn decrypt_slice(cipher: &Des, ciphertext: &[u8]) -> Result<Vec<u8>, DesError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(DesError::MalformedLength {
            length: ciphertext.len() as u64,
        });
    }

    let mut plain = ciphertext
        .par_chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            cipher.decrypt_block(block)
        })
        .collect::<Vec<[u8; BLOCK_SIZE]>>()
        .concat();

    let boundary = plain.len() - BLOCK_SIZE;
    let mut last = [0u8; BLOCK_SIZE];
    last.copy_from_slice(&plain[boundary..]);
    plain.truncate(boundary + unpadded_len(&last));
    Ok(plain)
}

/// Reads until `buf` is full or the stream ends; returns the bytes read.
///
/// Short reads mid-stream are retried, so a return below `BLOCK_SIZE` means
/// end of stream.
fn read_block<R: Read>(
    input: &mut R,
    buf: &mut [u8; BLOCK_SIZE],
    offset: u64,
) -> Result<usize, DesError> {
    let mut filled = 0;
    while filled < BLOCK_SIZE {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(source) if source.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(DesError::Read {
                    offset: offset + filled as u64,
                    source,
                })
            }
        }
    }
    Ok(filled)
}

/// Number of data bytes in a decrypted final block after removing padding.
///
/// The final byte `p` describes the pad run: if `1 <= p <= 8` and the last
/// `p` bytes all equal `p`, the run is stripped; anything else leaves the
/// block untouched. Plaintext that coincidentally ends in such a run is
/// indistinguishable from padding and is stripped too: the scheme carries
/// no length field, so the trailing bytes are the only end marker.
fn unpadded_len(block: &[u8; BLOCK_SIZE]) -> usize {
    let pad = block[BLOCK_SIZE - 1] as usize;
    if pad == 0 || pad > BLOCK_SIZE {
        return BLOCK_SIZE;
    }
    if block[BLOCK_SIZE - pad..].iter().all(|&b| b as usize == pad) {
        BLOCK_SIZE - pad
    } else {
        BLOCK_SIZE
    }
}

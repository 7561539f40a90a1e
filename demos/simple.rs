use des64_rs::{decrypt_slice, encrypt_slice, Des};

fn main() {
    println!("des64 Cipher Demo");

    let key = Des::generate_random_key();
    let cipher = Des::new(key);
    let message = b"an arbitrary-length message";

    let ciphertext = encrypt_slice(&cipher, message);
    let recovered = decrypt_slice(&cipher, &ciphertext).expect("well-formed ciphertext");

    println!("Key:        {:#018x}", key);
    println!("Message:    {} bytes", message.len());
    println!("Ciphertext: {} bytes", ciphertext.len());
    println!("Success:    {}", recovered == message);
}

use des64_rs::Des;

fn main() {
    println!("des64 Cipher Demo");

    let key = Des::generate_random_key();
    let cipher = Des::new(key);
    let message = 0x0F1E2D3C4B5A6978u64;

    let ciphertext = cipher.encrypt_u64(message);
    let recovered = cipher.decrypt_u64(ciphertext);

    println!("Key:       {:#018x}", key);
    println!("Message:   {:#018x}", message);
    println!("Encrypted: {:#018x}", ciphertext);
    println!("Recovered: {:#018x}", recovered);
    println!("Success:   {}", message == recovered);
}

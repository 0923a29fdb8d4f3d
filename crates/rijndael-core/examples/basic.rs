//! Encrypts and decrypts one 256-bit block under a 256-bit key.

use rijndael_core::Rijndael;

fn main() -> Result<(), rijndael_core::Error> {
    let key: Vec<u8> = (0u8..32).collect();
    let plain: [u8; 32] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0x88, 0x99, 0xaa,
        0xbb, 0xcc, 0xdd, 0xee, 0xff, 0xcc, 0xdd, 0xee, 0xff, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
        0xee, 0xff,
    ];

    let cipher = Rijndael::new(&key, 256)?;
    let ct = cipher.encrypt_block(&plain)?;
    let pt = cipher.decrypt_block(&ct)?;
    assert_eq!(pt.as_bytes(), &plain[..]);

    println!("{}", cipher.params());
    println!("plaintext:  {:02x?}", plain);
    println!("ciphertext: {:02x?}", ct.as_bytes());
    println!("example succeeded; decryption restored the plaintext");
    Ok(())
}

//! Command-line driver for `rijndael-core`.

#![forbid(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info, warn, LevelFilter};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_core::{Rijndael, RoundKeys};

const SIZES: [usize; 3] = [128, 192, 256];

/// FIPS-197 Appendix C: key `00 01 02 ...`, plaintext `00 11 22 ... ff`.
const FIPS_PLAIN: &str = "00112233445566778899aabbccddeeff";
const FIPS_VECTORS: [(usize, &str); 3] = [
    (16, "69c4e0d86a7b0430d8cdb78070b4c55a"),
    (24, "dda97ca4864cdfe06eaf70a0ec0d7191"),
    (32, "8ea2b7ca516745bfeafc49904b496089"),
];

const DEMO_PLAIN: &str = "00112233445566778899aabb8899aabbccddeeffccddeeff8899aabbccddeeff";

/// Key `00 01 ..` and `DEMO_PLAIN`, both cut to the variant's size.
const WIDE_VECTORS: [(usize, usize, &str); 3] = [
    (16, 192, "30487dc27d7ab7868dc8215f1977865b1c926a52b25de45e"),
    (24, 256, "9b786c22f92f1b72290072a532be41faa8f309f3bc99156266b37fa499ae2fe3"),
    (32, 256, "9d93139c7a6bd8432c5641e2773b8e17a3d509ed3a5f788921297269da268b67"),
];

/// Rijndael block cipher CLI.
#[derive(Parser)]
#[command(
    name = "rijndael",
    version,
    author,
    about = "Rijndael block cipher with 128/192/256-bit keys and blocks"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a single block.
    Encrypt(BlockArgs),
    /// Decrypt a single block.
    Decrypt(BlockArgs),
    /// Print the expanded key schedule, one round key per line.
    Schedule {
        /// Key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Block width in bits.
        #[arg(long, default_value_t = 128)]
        block_bits: usize,
    },
    /// Round-trip random blocks for every key/block size and check FIPS-197 vectors.
    SelfTest {
        /// Random blocks per key/block size combination.
        #[arg(long, default_value_t = 1000)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt and decrypt a 256-bit block under the key 00 01 .. 1f.
    Demo,
}

#[derive(clap::Args)]
struct BlockArgs {
    /// Key as 32, 48 or 64 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// Block width in bits.
    #[arg(long, default_value_t = 128)]
    block_bits: usize,
    /// Block as hex, exactly block_bits / 4 characters.
    #[arg(long, value_name = "HEX")]
    block_hex: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_log(cli.verbose);
    match cli.command {
        Commands::Encrypt(args) => cmd_transform(&args, Direction::Encrypt),
        Commands::Decrypt(args) => cmd_transform(&args, Direction::Decrypt),
        Commands::Schedule {
            key_hex,
            block_bits,
        } => cmd_schedule(&key_hex, block_bits),
        Commands::SelfTest { samples, seed } => cmd_self_test(samples, seed),
        Commands::Demo => cmd_demo(),
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn setup_log(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .format_timestamp(Some(env_logger::fmt::TimestampPrecision::Millis))
        .init();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn cmd_transform(args: &BlockArgs, direction: Direction) -> Result<()> {
    let cipher = build_cipher(&args.key_hex, args.block_bits)?;
    let mut block = hex::decode(args.block_hex.trim()).context("decode block hex")?;
    match direction {
        Direction::Encrypt => cipher.encrypt_in_place(&mut block),
        Direction::Decrypt => cipher.decrypt_in_place(&mut block),
    }
    .with_context(|| format!("{:?} with {}", direction, cipher.params()))?;
    println!("{}", hex::encode(block));
    Ok(())
}

fn cmd_schedule(key_hex: &str, block_bits: usize) -> Result<()> {
    let cipher = build_cipher(key_hex, block_bits)?;
    println!("{}", cipher.params());
    for line in schedule_lines(cipher.round_keys()) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_self_test(samples: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut failures = 0usize;

    for block_bits in SIZES {
        for key_bits in SIZES {
            let params = format!("block {block_bits} / key {key_bits}");
            match round_trip(&mut rng, block_bits, key_bits / 8, samples)? {
                None => println!("[passed] {params}: {samples} round trips"),
                Some(index) => {
                    failures += 1;
                    println!("[FAILED] {params}: sample {index} did not round-trip");
                }
            }
        }
    }

    for (key_len, cipher_hex) in FIPS_VECTORS {
        let name = format!("FIPS-197 AES-{}", key_len * 8);
        match known_answer(key_len, cipher_hex) {
            Ok(()) => println!("[passed] {name}"),
            Err(err) => {
                failures += 1;
                println!("[FAILED] {name}: {err:#}");
            }
        }
    }

    for (key_len, block_bits, cipher_hex) in WIDE_VECTORS {
        let name = format!("Rijndael-{block_bits}/{}", key_len * 8);
        match wide_known_answer(key_len, block_bits, cipher_hex) {
            Ok(()) => println!("[passed] {name} known answer"),
            Err(err) => {
                failures += 1;
                println!("[FAILED] {name} known answer: {err:#}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} self-test check(s) failed");
    }
    println!("self-test passed");
    info!("all {} variants verified", SIZES.len() * SIZES.len());
    Ok(())
}

/// Returns the index of the first block that failed to round-trip, if any.
fn round_trip(
    rng: &mut ChaCha20Rng,
    block_bits: usize,
    key_len: usize,
    samples: usize,
) -> Result<Option<usize>> {
    let mut key = vec![0u8; key_len];
    rng.fill_bytes(&mut key);
    let cipher = Rijndael::new(&key, block_bits)?;
    debug!("round-tripping {samples} blocks with {}", cipher.params());

    let mut block = vec![0u8; cipher.block_len()];
    for index in 0..samples {
        rng.fill_bytes(&mut block);
        let ct = cipher.encrypt_block(&block)?;
        let pt = cipher.decrypt_block(&ct)?;
        if pt.as_bytes() != block.as_slice() {
            warn!(
                "mismatch: key {} block {}",
                hex::encode(&key),
                hex::encode(&block)
            );
            return Ok(Some(index));
        }
    }
    Ok(None)
}

fn known_answer(key_len: usize, cipher_hex: &str) -> Result<()> {
    let key: Vec<u8> = (0..key_len as u8).collect();
    let cipher = Rijndael::new(&key, 128)?;
    let plain = hex::decode(FIPS_PLAIN)?;
    let ct = cipher.encrypt_block(&plain)?;
    if hex::encode(ct) != cipher_hex {
        bail!("expected ciphertext {cipher_hex}, got {}", hex::encode(ct));
    }
    let pt = cipher.decrypt_block(&ct)?;
    if pt.as_bytes() != plain.as_slice() {
        bail!("decryption did not restore {FIPS_PLAIN}");
    }
    Ok(())
}

fn wide_known_answer(key_len: usize, block_bits: usize, cipher_hex: &str) -> Result<()> {
    let key: Vec<u8> = (0..key_len as u8).collect();
    let cipher = Rijndael::new(&key, block_bits)?;
    let plain = hex::decode(DEMO_PLAIN)?;
    let plain = &plain[..cipher.block_len()];
    let ct = cipher.encrypt_block(plain)?;
    if hex::encode(ct) != cipher_hex {
        bail!("expected ciphertext {cipher_hex}, got {}", hex::encode(ct));
    }
    if cipher.decrypt_block(&ct)?.as_bytes() != plain {
        bail!("decryption did not restore the plaintext");
    }
    Ok(())
}

fn cmd_demo() -> Result<()> {
    let key: Vec<u8> = (0u8..32).collect();
    let plain = hex::decode(DEMO_PLAIN)?;
    let cipher = Rijndael::new(&key, plain.len() * 8)?;

    let ct = cipher.encrypt_block(&plain)?;
    let decrypted = cipher.decrypt_block(&ct)?;

    println!("{}", cipher.params());
    println!("original:   {}", group_words(&plain));
    println!("ciphertext: {}", group_words(&ct));
    println!("decrypted:  {}", group_words(&decrypted));
    if decrypted.as_bytes() != plain.as_slice() {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn build_cipher(key_hex: &str, block_bits: usize) -> Result<Rijndael> {
    let key = hex::decode(key_hex.trim()).context("decode key hex")?;
    Rijndael::new(&key, block_bits).context("construct cipher")
}

fn schedule_lines(round_keys: &RoundKeys) -> Vec<String> {
    let nr = round_keys.params().nr();
    (0..=nr)
        .map(|round| {
            let words: Vec<String> = round_keys
                .round_key(round)
                .iter()
                .map(hex::encode)
                .collect();
            format!("round {round:2}: {}", words.join(" "))
        })
        .collect()
}

/// Hex with a space between 4-byte words.
fn group_words(bytes: &[u8]) -> String {
    bytes
        .chunks(4)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join(" ")
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_encrypt_arguments() {
        let cli = Cli::try_parse_from([
            "rijndael",
            "-v",
            "encrypt",
            "--key-hex",
            "000102030405060708090a0b0c0d0e0f",
            "--block-hex",
            FIPS_PLAIN,
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Encrypt(args) => assert_eq!(args.block_bits, 128),
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn known_answers_pass() {
        for (key_len, cipher_hex) in FIPS_VECTORS {
            known_answer(key_len, cipher_hex).unwrap();
        }
        assert!(known_answer(16, FIPS_VECTORS[1].1).is_err());
    }

    #[test]
    fn wide_known_answers_pass() {
        for (key_len, block_bits, cipher_hex) in WIDE_VECTORS {
            wide_known_answer(key_len, block_bits, cipher_hex).unwrap();
        }
        assert!(wide_known_answer(16, 256, WIDE_VECTORS[2].2).is_err());
    }

    #[test]
    fn each_verbose_flag_raises_log_level() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(1), LevelFilter::Info);
        assert_eq!(log_level(2), LevelFilter::Debug);
        assert_eq!(log_level(3), LevelFilter::Trace);
        assert_eq!(log_level(9), LevelFilter::Trace);
    }

    #[test]
    fn self_test_passes_with_seed() {
        cmd_self_test(5, Some(1)).unwrap();
    }

    #[test]
    fn seeded_round_trips_pass_for_all_sizes() {
        let mut rng = seeded_rng(Some(42));
        for block_bits in SIZES {
            for key_bits in SIZES {
                assert_eq!(round_trip(&mut rng, block_bits, key_bits / 8, 20).unwrap(), None);
            }
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = seeded_rng(Some(7));
        let mut b = seeded_rng(Some(7));
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn schedule_has_one_line_per_round() {
        let cipher = build_cipher("2b7e151628aed2a6abf7158809cf4f3c", 128).unwrap();
        let lines = schedule_lines(cipher.round_keys());
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "round  0: 2b7e1516 28aed2a6 abf71588 09cf4f3c");
        assert!(lines[10].ends_with("b6630ca6"));
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(build_cipher("zz", 128).is_err());
        assert!(build_cipher("00112233445566778899aabbccddeeff00112233", 128).is_err());
        assert!(build_cipher("000102030405060708090a0b0c0d0e0f", 100).is_err());
        let args = BlockArgs {
            key_hex: "000102030405060708090a0b0c0d0e0f".into(),
            block_bits: 192,
            block_hex: FIPS_PLAIN.into(),
        };
        assert!(cmd_transform(&args, Direction::Encrypt).is_err());
    }

    #[test]
    fn group_words_splits_every_four_bytes() {
        assert_eq!(group_words(&[0, 1, 2, 3, 4, 5]), "00010203 0405");
    }
}

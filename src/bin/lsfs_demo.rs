//! Demo binary: keygen/sign/verify over a chosen named parameter set.
//!
//! This is a thin wrapper exposing the scheme under a fixed-length
//! NIST-style API; the signing/verification core itself has no notion of
//! such a wrapper -- the crate's actual API surface is [`lsfs::keypair`],
//! [`lsfs::sign`], and [`lsfs::open`].

use std::io::Write;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::OsRng;
use tracing_subscriber::EnvFilter;

use lsfs::params::ParamSet;

#[derive(Parser)]
#[command(author, version, about = "lsfs post-quantum signature demo", long_about = None)]
struct Cli {
    /// Named parameter set.
    #[arg(long, value_enum, default_value = "128pq", global = true)]
    params: ParamSetArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a fresh keypair, printed as hex.
    Keygen,
    /// Sign a message (read from stdin if `--message` is absent) and print
    /// `signed_message = message ‖ sig` as hex.
    Sign(SignArgs),
    /// Verify a hex-encoded `signed_message` against a hex-encoded public key.
    Verify(VerifyArgs),
}

#[derive(clap::Args)]
struct SignArgs {
    /// Hex-encoded secret key (as printed by `keygen`)
    #[arg(long)]
    sk: String,
    /// Message to sign
    #[arg(long)]
    message: String,
}

#[derive(clap::Args)]
struct VerifyArgs {
    /// Hex-encoded public key
    #[arg(long)]
    pk: String,
    /// Hex-encoded H-seed, as printed alongside `pk` by `keygen`
    #[arg(long)]
    h_seed: String,
    /// Hex-encoded `signed_message` (as printed by `sign`)
    #[arg(long)]
    signed_message: String,
}

/// A `clap`-friendly mirror of [`ParamSet`]'s six named security levels.
#[derive(Clone, Copy, ValueEnum)]
enum ParamSetArg {
    #[value(name = "64pq")]
    Lsfs64Pq,
    #[value(name = "128cl")]
    Lsfs128Cl,
    #[value(name = "96pq")]
    Lsfs96Pq,
    #[value(name = "192cl")]
    Lsfs192Cl,
    #[value(name = "128pq")]
    Lsfs128Pq,
    #[value(name = "256cl")]
    Lsfs256Cl,
}

impl ParamSetArg {
    fn into_param_set(self) -> ParamSet {
        match self {
            ParamSetArg::Lsfs64Pq => ParamSet::Lsfs64Pq,
            ParamSetArg::Lsfs128Cl => ParamSet::Lsfs128Cl,
            ParamSetArg::Lsfs96Pq => ParamSet::Lsfs96Pq,
            ParamSetArg::Lsfs192Cl => ParamSet::Lsfs192Cl,
            ParamSetArg::Lsfs128Pq => ParamSet::Lsfs128Pq,
            ParamSetArg::Lsfs256Cl => ParamSet::Lsfs256Cl,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lsfs=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let params = cli.params.into_param_set().params();

    match cli.command {
        Command::Keygen => {
            let mut rng = OsRng;
            let kp = lsfs::keypair(params, &mut rng)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "sk:     0x{}", hex::encode(kp.sk.seed_bytes()))?;
            writeln!(out, "pk:     0x{}", hex::encode(kp.pk.syndrome_bytes()))?;
            writeln!(
                out,
                "h_seed: 0x{}",
                hex::encode(&kp.sk.seed_bytes()[..params.seed_h_byte_len])
            )?;
        }
        Command::Sign(args) => {
            let sk_bytes = hex::decode(args.sk.trim_start_matches("0x"))?;
            let sk = lsfs::keygen::SecretKey::from_seed_bytes(params, sk_bytes)?;
            let h = sk.matrix(params);
            let kp_like = lsfs::keygen::KeyPair {
                pk: lsfs::keygen::PublicKey {
                    syndrome: h.syndrome(&sk.secret_vector(params)),
                },
                h,
                sk,
            };
            let signed = lsfs::sign(params, &kp_like, args.message.as_bytes())?;
            println!("0x{}", hex::encode(signed));
        }
        Command::Verify(args) => {
            let pk_bytes = hex::decode(args.pk.trim_start_matches("0x"))?;
            let h_seed = hex::decode(args.h_seed.trim_start_matches("0x"))?;
            let signed_message = hex::decode(args.signed_message.trim_start_matches("0x"))?;

            let syndrome = lsfs::bitvec::Bitvec::from_bytes(params.r, pk_bytes)?;
            let pk = lsfs::keygen::PublicKey { syndrome };
            let h = lsfs::matrix::Matrix::from_seed(&h_seed, params.r, params.n);

            match lsfs::open(params, &h, &pk, &signed_message)? {
                Some(message) => {
                    println!("accept");
                    println!("message: {}", String::from_utf8_lossy(&message));
                }
                None => {
                    println!("reject");
                    bail!("signature did not verify");
                }
            }
        }
    }

    Ok(())
}

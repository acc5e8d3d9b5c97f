use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.polkadot)
    #[arg(short, long, default_value = ".env", global = true)]
    pub env_file: String,

    /// Runtime metadata file, SCALE bytes or 0x hex (overrides PCB_CHAIN_METADATA_PATH)
    #[arg(short, long, global = true)]
    pub metadata: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Which call the arguments belong to.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct CallTarget {
    /// Pallet name, case-insensitive
    #[arg(short, long)]
    pub pallet: String,

    /// Call name
    #[arg(short, long)]
    pub call: String,
}

/// A call plus form input for its arguments.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct CallInput {
    #[command(flatten)]
    pub target: CallTarget,

    /// Argument value as NAME=VALUE; VALUE is read as JSON when it parses, text otherwise
    #[arg(short, long = "arg", value_name = "NAME=VALUE")]
    pub args: Vec<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List pallets, or the calls of one pallet
    Calls {
        #[arg(short, long)]
        pallet: Option<String>,
    },
    /// Encode call arguments to hex
    Encode(CallInput),
    /// Decode concatenated argument hex
    Decode {
        #[command(flatten)]
        target: CallTarget,

        #[arg(long)]
        hex: String,
    },
    /// Break one encoded argument down into a hex tree
    Decompose {
        #[command(flatten)]
        input: CallInput,

        /// Argument to decompose
        #[arg(short, long)]
        field: String,
    },
    /// Validate call arguments
    Validate(CallInput),
    /// Convert a token amount to planck
    ToPlanck {
        amount: String,

        /// Denomination label, e.g. DOT, mDOT or planck (default: the main unit)
        #[arg(short, long)]
        unit: Option<String>,
    },
    /// Convert a planck amount to a token amount
    FromPlanck {
        planck: String,

        #[arg(short, long)]
        unit: Option<String>,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_env_file() {
        let args = Args::try_parse_from(["polkadot-call-builder", "calls"]).unwrap();
        assert_eq!(args.env_file, ".env");
        assert!(args.metadata.is_none());
        assert_eq!(args.command, Command::Calls { pallet: None });
    }

    #[test]
    fn test_encode_with_repeated_args() {
        let args = Args::try_parse_from([
            "polkadot-call-builder",
            "--metadata",
            "metadata.scale",
            "encode",
            "--pallet",
            "Balances",
            "--call",
            "transfer_keep_alive",
            "--arg",
            "dest=5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
            "--arg",
            "value=1000",
        ])
        .unwrap();

        assert_eq!(args.metadata, Some(PathBuf::from("metadata.scale")));
        let Command::Encode(input) = args.command else {
            panic!("expected encode command");
        };
        assert_eq!(input.target.pallet, "Balances");
        assert_eq!(input.target.call, "transfer_keep_alive");
        assert_eq!(input.args.len(), 2);
        assert_eq!(input.args[1], "value=1000");
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "polkadot-call-builder",
            "to-planck",
            "1.5",
            "--unit",
            "mDOT",
            "--env-file",
            ".env.kusama",
        ])
        .unwrap();

        assert_eq!(args.env_file, ".env.kusama");
        assert_eq!(
            args.command,
            Command::ToPlanck {
                amount: "1.5".to_string(),
                unit: Some("mDOT".to_string())
            }
        );
    }

    #[test]
    fn test_decode_requires_hex() {
        let result = Args::try_parse_from([
            "polkadot-call-builder",
            "decode",
            "--pallet",
            "System",
            "--call",
            "remark",
        ]);
        assert!(result.is_err());
    }
}

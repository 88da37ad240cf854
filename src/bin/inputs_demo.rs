// Circuit Inputs Demo
// Parses an MRZ file and prints the circuit variant and input map the
// register flow would hand to the prover.
use clap::Parser;
use zk_passport_registry::{
    build_register_inputs, parse_mrz, CircuitInput, InputOptions, PassportRecord,
    PASSPORT_ATTESTATION_ID,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "inputs-demo")]
struct Cli {
    /// Path to a file containing the two-line MRZ text
    #[arg(short, long)]
    mrz_file: String,

    /// Secret to encode (0x-prefixed hex); a fixed demo value by default
    #[arg(short, long, default_value = "0x0102030405060708")]
    secret: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mrz_text = std::fs::read_to_string(&cli.mrz_file)?;
    let info = parse_mrz(&mrz_text)?;
    tracing::info!("🛂 Parsed MRZ: document {}", info.document_number);

    // Chip fields come from the NFC read in the real flow; the mock record
    // supplies them here so the demo runs without hardware.
    let mut record = PassportRecord::mock_sha256_rsa_65537();
    record.document_number = info.document_number;
    record.date_of_birth = info.birth_date;
    record.date_of_expiry = info.expiry_date;

    let (variant, inputs) = build_register_inputs(
        &cli.secret,
        PASSPORT_ATTESTATION_ID,
        &record,
        InputOptions {
            development_mode: true,
        },
    )?;

    tracing::info!("🧾 Selected circuit: {}", variant.name);
    tracing::info!(
        "🧾 Limb parameters: {} bits x {} words",
        variant.limb_bits,
        variant.limb_count
    );

    for key in inputs.keys() {
        match inputs.get(key) {
            Some(CircuitInput::Scalar(value)) => tracing::info!("   • {}: {}", key, value),
            Some(CircuitInput::Words(words)) => tracing::info!(
                "   • {}: [{}, {}, ...] ({} words)",
                key,
                words[0],
                words[1],
                words.len()
            ),
            None => unreachable!(),
        }
    }

    Ok(())
}

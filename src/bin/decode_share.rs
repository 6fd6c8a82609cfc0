use shamir_reconstruction::reconstruction::radix;

// This binary prints the decimal value of a single share value written in the given base.
// Run via
// ```
// cargo run --bin decode_share -- base=<radix> value=<digits>
// ```
fn main() -> Result<(), anyhow::Error> {
    let base = find_argument("base")
        .ok_or_else(|| anyhow::anyhow!("base argument is required, e.g., base=16"))?
        .parse::<u32>()
        .map_err(|e| anyhow::anyhow!("base must be an integer: {e}"))?;
    let value = find_argument("value")
        .ok_or_else(|| anyhow::anyhow!("value argument is required, e.g., value=1a"))?;

    let decoded = radix::decode(&value, base)?;
    println!("{decoded}");

    Ok(())
}

fn find_argument(name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    std::env::args()
        .find(|arg| arg.starts_with(&prefix))
        .map(|arg| arg.trim_start_matches(&prefix).trim().to_string())
}

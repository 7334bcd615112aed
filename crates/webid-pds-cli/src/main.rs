//! WebID PDS CLI, the `pds` command.
//!
//! Operator tooling around a data root: issuer keys and bearer tokens
//! for the server, identity-root inspection, index rebuilds, and the
//! shallow Turtle to JSON-LD conversion.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use webid_pds::identity::{key_id, mint_token};
use webid_pds::{convert, Pds, StoreConfig, TokenClaims, WebId};

// ── Duration helper ───────────────────────────────────────────────────────────

/// Parse a duration like "1h", "7d", "1h30m", or plain seconds.
fn parse_duration_secs(s: &str) -> Result<i64> {
    let s = s.trim();

    if let Ok(n) = s.parse::<i64>() {
        if n <= 0 {
            bail!("duration must be > 0");
        }
        return Ok(n);
    }

    let mut total: i64 = 0;
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
        } else {
            let val: i64 = current
                .parse()
                .map_err(|_| anyhow!("invalid duration: {s}"))?;
            current.clear();
            let unit: i64 = match ch {
                'd' => 86400,
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => bail!("unknown duration unit '{ch}' in '{s}'"),
            };
            total = val
                .checked_mul(unit)
                .and_then(|secs| total.checked_add(secs))
                .ok_or_else(|| anyhow!("duration '{s}' is too long"))?;
        }
    }

    if !current.is_empty() {
        bail!("duration '{s}' is missing a unit (d/h/m/s)");
    }
    if total == 0 {
        bail!("duration must be > 0");
    }
    Ok(total)
}

// ── Key helpers ───────────────────────────────────────────────────────────────

fn read_signing_key(path: &Path) -> Result<SigningKey> {
    let encoded = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read key file {}", path.display()))?,
    );
    let bytes = Zeroizing::new(
        STANDARD
            .decode(encoded.trim())
            .context("key file is not valid base64")?,
    );
    let secret: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow!("key file must hold a 32-byte Ed25519 secret key"))?;
    Ok(SigningKey::from_bytes(&secret))
}

fn write_secret(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict permissions on {}", path.display()))?;
    }
    Ok(())
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// WebID PDS CLI: manage issuer keys and tokens and inspect a data root.
#[derive(Parser, Debug)]
#[command(name = "pds", about = "WebID PDS CLI", version)]
struct Cli {
    /// Directory holding all store state
    #[arg(long, global = true, env = "DATA_ROOT", default_value = "./data")]
    data_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an issuer signing key
    Keygen {
        /// File to write the base64 secret key to
        #[arg(long)]
        out: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Mint a bearer token for a WebID
    Token {
        #[arg(long)]
        webid: String,
        /// Issuer secret key file; without it the token is signed by a
        /// throwaway key and only a mock-mode server accepts it
        #[arg(long)]
        key: Option<PathBuf>,
        /// Lifetime, e.g. 1h, 30m, 7d
        #[arg(long, default_value = "1h")]
        ttl: String,
        #[arg(long)]
        audience: Option<String>,
        #[arg(long)]
        issuer: Option<String>,
    },

    /// Print the identity root a WebID maps to
    Resolve {
        #[arg(long)]
        webid: String,
    },

    /// List the stored credentials of a WebID
    Ls {
        #[arg(long)]
        webid: String,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the credentials index of a WebID
    Reindex {
        #[arg(long)]
        webid: String,
    },

    /// Convert a Turtle file to (shallow) JSON-LD
    Convert {
        file: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let data_root = cli.data_root;

    let result = match cli.command {
        Commands::Keygen { out, force } => cmd_keygen(&out, force),
        Commands::Token {
            webid,
            key,
            ttl,
            audience,
            issuer,
        } => cmd_token(&webid, key.as_deref(), &ttl, audience, issuer),
        Commands::Resolve { webid } => cmd_resolve(&data_root, &webid),
        Commands::Ls { webid, json } => cmd_ls(&data_root, &webid, json),
        Commands::Reindex { webid } => cmd_reindex(&data_root, &webid),
        Commands::Convert { file } => cmd_convert(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

fn open_store(data_root: &Path) -> Result<Pds> {
    Pds::open(StoreConfig::new(data_root))
        .with_context(|| format!("failed to open data root {}", data_root.display()))
}

fn parse_webid(raw: &str) -> Result<WebId> {
    WebId::parse(raw).context("invalid --webid")
}

/// `pds keygen --out FILE`
fn cmd_keygen(out: &Path, force: bool) -> Result<()> {
    if out.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", out.display());
    }

    let signing_key = SigningKey::generate(&mut rand::thread_rng());
    let secret = Zeroizing::new(STANDARD.encode(signing_key.to_bytes()));
    write_secret(out, &secret)?;

    let verifying_key = signing_key.verifying_key();
    println!("Wrote secret key to {}", out.display());
    println!("  Public key: {}", STANDARD.encode(verifying_key.as_bytes()));
    println!("  Key ID:     {}", key_id(&verifying_key));
    println!();
    println!("Start the server with PDS_ISSUER_PUBLIC_KEY set to the public key.");
    Ok(())
}

/// `pds token --webid URI [--key FILE]`
fn cmd_token(
    webid: &str,
    key: Option<&Path>,
    ttl: &str,
    audience: Option<String>,
    issuer: Option<String>,
) -> Result<()> {
    let webid = parse_webid(webid)?;
    let ttl = parse_duration_secs(ttl)?;
    if webid_pds::time::now_unix_secs().checked_add(ttl).is_none() {
        bail!("--ttl is too long");
    }

    let signing_key = match key {
        Some(path) => read_signing_key(path)?,
        None => {
            log::warn!("no --key given; token is only accepted in mock mode");
            SigningKey::generate(&mut rand::thread_rng())
        }
    };

    let claims = TokenClaims {
        sub: Some(webid.to_string()),
        iss: issuer,
        aud: audience,
        ..TokenClaims::for_webid(webid.as_str(), ttl)
    };
    let token = mint_token(&signing_key, &claims).context("failed to mint token")?;
    println!("{token}");
    Ok(())
}

/// `pds resolve --webid URI`
fn cmd_resolve(data_root: &Path, webid: &str) -> Result<()> {
    let webid = parse_webid(webid)?;
    let config = StoreConfig::new(data_root);
    let resolver = webid_pds::IdentityResolver::new(config.storage_root());
    println!("{}", resolver.resolve(&webid).display());
    Ok(())
}

/// `pds ls --webid URI`
fn cmd_ls(data_root: &Path, webid: &str, json: bool) -> Result<()> {
    let webid = parse_webid(webid)?;
    let pds = open_store(data_root)?;

    let members = pds.credentials().members(&webid)?;
    let entries: Vec<_> = pds
        .store()
        .list(&pds.layout(&webid).credentials_dir())?
        .into_iter()
        .filter(|e| members.contains(&e.name))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No credentials stored for {webid}");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "{:<40} {:>8}  {}",
            entry.name,
            entry.size,
            webid_pds::time::to_rfc3339(entry.modified_at)
        );
    }
    Ok(())
}

/// `pds reindex --webid URI`
fn cmd_reindex(data_root: &Path, webid: &str) -> Result<()> {
    let webid = parse_webid(webid)?;
    let pds = open_store(data_root)?;

    pds.credentials()
        .index(&webid)
        .context("failed to rebuild index")?;
    let count = pds.credentials().members(&webid)?.len();
    println!(
        "Rebuilt {} ({count} member(s))",
        pds.layout(&webid).index().display()
    );
    Ok(())
}

/// `pds convert FILE`
fn cmd_convert(file: &Path) -> Result<()> {
    let turtle = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let doc = convert::turtle_to_json_ld(&turtle);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

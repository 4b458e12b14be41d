//! Key File Tests
//!
//! Exercises the subcommands against a temporary instance directory:
//! - generate writes a loadable, valid key file
//! - generate refuses to clobber without --force
//! - the public key converts to the 65-byte point pages subscribe with
//! - check rejects broken files
//! - key files with DER private keys still load

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use p256::pkcs8::EncodePrivateKey;
use pushsub::{commands, Config, VapidKeys};
use pushsub_core::url_base64_to_bytes;
use std::fs;
use tempfile::TempDir;

fn temp_config() -> (TempDir, Config) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config::load(Some(temp_dir.path().join("instance"))).expect("config");
    (temp_dir, config)
}

#[test]
fn test_generate_creates_instance_dir_and_key_file() {
    let (_temp_dir, config) = temp_config();

    let keys = commands::generate(&config, false).expect("generate");
    assert!(config.keys_path().exists());

    let loaded = VapidKeys::load(&config.keys_path()).expect("load");
    assert_eq!(loaded.public_key_base64url(), keys.public_key_base64url());
    assert_eq!(loaded.private_key_base64url(), keys.private_key_base64url());

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.keys_path()).expect("read")).expect("json");
    assert!(raw["publicKey"].is_string());
    assert!(raw["privateKey"].is_string());
}

#[cfg(unix)]
#[test]
fn test_key_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp_dir, config) = temp_config();
    commands::generate(&config, false).expect("generate");

    let mode = fs::metadata(config.keys_path()).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_generate_refuses_to_overwrite_without_force() {
    let (_temp_dir, config) = temp_config();

    let first = commands::generate(&config, false).expect("first generate");
    assert!(commands::generate(&config, false).is_err());
    assert_eq!(
        commands::public_key(&config).expect("public key"),
        first.public_key_base64url()
    );

    let replaced = commands::generate(&config, true).expect("forced generate");
    assert_ne!(replaced.public_key_base64url(), first.public_key_base64url());
    assert_eq!(
        commands::public_key(&config).expect("public key"),
        replaced.public_key_base64url()
    );
}

#[test]
fn test_public_key_converts_like_the_browser() {
    let (_temp_dir, config) = temp_config();
    commands::generate(&config, false).expect("generate");

    let public_key = commands::public_key(&config).expect("public key");
    let bytes = url_base64_to_bytes(&public_key).expect("convert");
    assert_eq!(bytes.len(), 65);
    assert_eq!(bytes[0], 0x04);

    commands::check(&config).expect("check passes");
}

#[test]
fn test_check_fails_without_key_file() {
    let (_temp_dir, config) = temp_config();
    assert!(commands::check(&config).is_err());
    assert!(commands::public_key(&config).is_err());
}

#[test]
fn test_check_rejects_corrupt_key_file() {
    let (_temp_dir, config) = temp_config();
    fs::create_dir_all(&config.instance_dir).expect("mkdir");
    fs::write(
        config.keys_path(),
        r#"{"publicKey": "BEl62iUY", "privateKey": "AAAA"}"#,
    )
    .expect("write");

    assert!(commands::check(&config).is_err());
}

#[test]
fn test_pkcs8_private_key_file_loads_as_raw_scalar() {
    let (_temp_dir, config) = temp_config();
    let signing_key = p256::ecdsa::SigningKey::random(&mut p256::elliptic_curve::rand_core::OsRng);
    let public = signing_key.verifying_key().to_encoded_point(false);
    let secret: p256::SecretKey = signing_key.into();
    let der = secret.to_pkcs8_der().expect("PKCS8 DER");

    fs::create_dir_all(&config.instance_dir).expect("mkdir");
    fs::write(
        config.keys_path(),
        serde_json::json!({
            "publicKey": URL_SAFE_NO_PAD.encode(public.as_bytes()),
            "privateKey": URL_SAFE_NO_PAD.encode(der.as_bytes()),
        })
        .to_string(),
    )
    .expect("write");

    commands::check(&config).expect("legacy key file passes check");
    let keys = VapidKeys::load(&config.keys_path()).expect("load");
    let scalar = URL_SAFE_NO_PAD
        .decode(keys.private_key_base64url())
        .expect("decode");
    assert_eq!(scalar.len(), 32);
    assert_eq!(scalar.as_slice(), secret.to_bytes().as_slice());
}

//! End-to-end registry flows over the in-memory store with real Ed25519
//! keys: admin bootstrap, document lifecycle, trust setup, credential
//! issuance and verification, revocation, blacklisting, and the delegation
//! lifecycle behind presentation verification.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};

use vdr_core::{RegistryError, SigningBytes};
use vdr_crypto::{Ed25519KeyPair, Ed25519Suite};
use vdr_engine::{DidRegistry, EngineConfig, FixedClock, RecordingSink, StaticCaller};
use vdr_store::MemStateStore;

/// Mid-2024, inside every test credential's validity window.
const NOW: i64 = 1_720_000_000;

const VC_ID: &str = "https://vc.example.com/credentials/1";

const TEMPLATE_SCHEMA: &str = r#"{
    "type": "object",
    "required": ["id", "name"],
    "properties": {
        "id": {"type": "string"},
        "name": {"type": "string"}
    }
}"#;

struct Actor {
    kp: Ed25519KeyPair,
    did: String,
    address: String,
    pem: String,
}

fn actor(seed: u8) -> Actor {
    let kp = Ed25519KeyPair::from_seed(&[seed; 32]);
    let address = format!("{seed:02x}").repeat(20);
    let did = format!("did:vdrx:{address}");
    let pem = kp.public_key_pem();
    Actor {
        kp,
        did,
        address,
        pem,
    }
}

fn sign_into(value: &mut Value, signer: &Actor, purpose: &str) {
    let text = serde_json::to_string(value).unwrap();
    let signing = SigningBytes::strip_proof(&text).unwrap();
    let proof_value = STANDARD.encode(signer.kp.sign(&signing));
    value["proof"] = json!({
        "type": "Ed25519Signature2020",
        "proofPurpose": purpose,
        "verificationMethod": format!("{}#key-1", signer.did),
        "proofValue": proof_value,
    });
}

fn document_json(subject: &Actor) -> String {
    let mut doc = json!({
        "@context": "https://www.w3.org/ns/did/v1",
        "id": subject.did,
        "verificationMethod": [{
            "id": format!("{}#key-1", subject.did),
            "type": "Ed25519VerificationKey2020",
            "publicKeyPem": subject.pem,
            "controller": subject.did,
            "address": subject.address,
        }],
        "authentication": [format!("{}#key-1", subject.did)],
    });
    sign_into(&mut doc, subject, "assertionMethod");
    serde_json::to_string(&doc).unwrap()
}

fn credential_json(issuer: &Actor, holder: &Actor, vc_id: &str) -> String {
    let mut vc = json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "id": vc_id,
        "type": ["VerifiableCredential", "Identity"],
        "issuer": issuer.did,
        "issuanceDate": "2024-01-01T00:00:00Z",
        "expirationDate": "2034-01-01T00:00:00Z",
        "credentialSubject": {"id": holder.did, "name": "Holder"},
        "template": {"id": "tpl-1", "name": "identity", "version": "v1", "vcType": "Identity"},
    });
    sign_into(&mut vc, issuer, "assertionMethod");
    serde_json::to_string(&vc).unwrap()
}

fn presentation_json(presenter: &Actor, vc_jsons: &[&str]) -> String {
    let credentials: Vec<Value> = vc_jsons
        .iter()
        .map(|text| serde_json::from_str(text).unwrap())
        .collect();
    let mut vp = json!({
        "id": "vp-1",
        "type": "VerifiablePresentation",
        "verifiableCredential": credentials,
    });
    sign_into(&mut vp, presenter, "authentication");
    serde_json::to_string(&vp).unwrap()
}

struct Harness {
    registry: DidRegistry<MemStateStore>,
    clock: Arc<FixedClock>,
    caller: Arc<StaticCaller>,
    sink: Arc<RecordingSink>,
}

fn harness(config: EngineConfig) -> Harness {
    static TRACING: std::sync::Once = std::sync::Once::new();
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
    let clock = Arc::new(FixedClock::new(NOW));
    let caller = Arc::new(StaticCaller::new(""));
    let sink = Arc::new(RecordingSink::new());
    let registry = DidRegistry::new(
        MemStateStore::new(),
        config,
        clock.clone(),
        caller.clone(),
        sink.clone(),
        Arc::new(Ed25519Suite),
    );
    Harness {
        registry,
        clock,
        caller,
        sink,
    }
}

/// Admin + issuer + holder registered, issuer trusted, template stored, and
/// the holder's credential issuance logged. Leaves the caller as admin.
fn trust_setup(h: &Harness) -> (Actor, Actor, Actor) {
    let admin = actor(1);
    let issuer = actor(2);
    let holder = actor(3);
    h.registry.init_admin(&document_json(&admin)).unwrap();
    h.registry.add_did_document(&document_json(&issuer)).unwrap();
    h.registry.add_did_document(&document_json(&holder)).unwrap();
    h.caller.set(&*admin.address);
    h.registry.add_trust_issuer(&[issuer.did.clone()]).unwrap();
    h.registry
        .set_vc_template("tpl-1", "identity", "Identity", "v1", TEMPLATE_SCHEMA)
        .unwrap();
    h.caller.set(&*issuer.address);
    h.registry
        .log_vc_issuance(&issuer.did, &holder.did, "tpl-1", VC_ID)
        .unwrap();
    h.caller.set(&*admin.address);
    (admin, issuer, holder)
}

// ─── Document lifecycle ─────────────────────────────────────────────

#[test]
fn admin_bootstrap_and_document_registration() {
    let h = harness(EngineConfig::default());
    let admin = actor(1);
    let user = actor(3);

    h.registry.init_admin(&document_json(&admin)).unwrap();
    assert_eq!(h.registry.admin().unwrap(), admin.did);

    h.registry.add_did_document(&document_json(&user)).unwrap();
    assert!(h.registry.is_valid_did(&user.did).unwrap());
    assert!(!h.registry.is_valid_did("did:vdrx:unregistered").unwrap());
    assert!(!h.registry.is_valid_did("did:web5:foreign-method").unwrap());

    // Registering the same DID again is a duplicate-identity error.
    let err = h
        .registry
        .add_did_document(&document_json(&user))
        .unwrap_err();
    assert_eq!(err.to_string(), format!("{} already exists", user.did));

    // Reverse indices point back at the DID.
    assert_eq!(h.registry.get_did_by_pubkey(&user.pem).unwrap(), user.did);
    assert_eq!(
        h.registry.get_did_by_address(&user.address).unwrap(),
        user.did
    );
    let doc = h.registry.get_did_document(&user.did).unwrap();
    assert!(doc.contains(&user.did));
    assert!(!doc.contains("proofValue"));
    assert_eq!(
        h.registry.get_did_document_by_address(&user.address).unwrap(),
        doc
    );
}

#[test]
fn foreign_key_material_is_rejected() {
    let h = harness(EngineConfig::default());
    let admin = actor(1);
    let user = actor(3);
    h.registry.init_admin(&document_json(&admin)).unwrap();
    h.registry.add_did_document(&document_json(&user)).unwrap();

    // A new DID claiming the user's key and address.
    let thief = actor(4);
    let mut doc: Value = serde_json::from_str(&document_json(&thief)).unwrap();
    doc["verificationMethod"][0]["publicKeyPem"] = json!(user.pem);
    doc.as_object_mut().unwrap().remove("proof");
    sign_into(&mut doc, &thief, "assertionMethod");
    let err = h
        .registry
        .add_did_document(&serde_json::to_string(&doc).unwrap())
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateIdentity(_)));
}

#[test]
fn tampered_registration_fails_signature() {
    let h = harness(EngineConfig::default());
    let admin = actor(1);
    h.registry.init_admin(&document_json(&admin)).unwrap();

    let user = actor(3);
    let tampered = document_json(&user).replace("\"authentication\"", "\"authenticatioN\"");
    assert!(matches!(
        h.registry.add_did_document(&tampered),
        Err(RegistryError::SignatureInvalid(_))
    ));
}

#[test]
fn update_rotates_key_material_and_indices() {
    let h = harness(EngineConfig::default());
    let admin = actor(1);
    let user = actor(3);
    h.registry.init_admin(&document_json(&admin)).unwrap();
    h.registry.add_did_document(&document_json(&user)).unwrap();

    // Same DID and address, fresh key; the subject signs with the new key.
    let rotated = Actor {
        kp: Ed25519KeyPair::from_seed(&[33u8; 32]),
        did: user.did.clone(),
        address: user.address.clone(),
        pem: Ed25519KeyPair::from_seed(&[33u8; 32]).public_key_pem(),
    };

    // A stranger may not update someone else's document.
    h.caller.set("no-such-address");
    let err = h
        .registry
        .update_did_document(&document_json(&rotated))
        .unwrap_err();
    assert_eq!(err.to_string(), "no operation permission");

    h.caller.set(&*user.address);
    h.registry
        .update_did_document(&document_json(&rotated))
        .unwrap();

    // The old key's index entry is gone; the new one resolves.
    assert!(matches!(
        h.registry.get_did_by_pubkey(&user.pem),
        Err(RegistryError::DidNotFound)
    ));
    assert_eq!(
        h.registry.get_did_by_pubkey(&rotated.pem).unwrap(),
        user.did
    );
}

#[test]
fn blacklisted_did_document_is_unreadable() {
    let h = harness(EngineConfig::default());
    let (_admin, _issuer, holder) = trust_setup(&h);
    assert!(h.registry.get_did_document(&holder.did).is_ok());

    h.registry.add_black_list(&[holder.did.clone()]).unwrap();
    let err = h.registry.get_did_document(&holder.did).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("{} is in black list", holder.did)
    );
}

#[test]
fn multibyte_did_input_fails_structurally() {
    let h = harness(EngineConfig {
        enable_issue_log: false,
        ..EngineConfig::default()
    });
    let admin = actor(1);
    let issuer = actor(2);
    h.registry.init_admin(&document_json(&admin)).unwrap();
    h.registry.add_did_document(&document_json(&issuer)).unwrap();
    h.caller.set(&*admin.address);
    h.registry.add_trust_issuer(&[issuer.did.clone()]).unwrap();
    h.registry
        .set_vc_template("tpl-1", "identity", "Identity", "v1", TEMPLATE_SCHEMA)
        .unwrap();

    // Byte offsets inside 'é' are not char boundaries; every surface must
    // return a value, never crash.
    assert!(!h.registry.is_valid_did("did:vdré").unwrap());
    assert!(matches!(
        h.registry.add_black_list(&["did:vdré".into()]),
        Err(RegistryError::InvalidDidMethod)
    ));
    assert!(h.registry.get_did_document("did:vdré").is_err());

    // A credential naming a multibyte subject runs the full walk, including
    // the blacklist lookup over the sanitized key.
    let mut vc: Value =
        serde_json::from_str(&credential_json(&issuer, &issuer, VC_ID)).unwrap();
    vc["credentialSubject"]["id"] = json!("did:vdré");
    vc.as_object_mut().unwrap().remove("proof");
    sign_into(&mut vc, &issuer, "assertionMethod");
    assert!(h
        .registry
        .verify_vc(&serde_json::to_string(&vc).unwrap())
        .unwrap());
}

#[test]
fn admin_pointer_transfer_is_gated() {
    let h = harness(EngineConfig::default());
    let admin = actor(1);
    let user = actor(3);
    h.registry.init_admin(&document_json(&admin)).unwrap();
    h.registry.add_did_document(&document_json(&user)).unwrap();

    h.caller.set(&*user.address);
    assert!(h.registry.set_admin(&user.did).is_err());

    h.caller.set(&*admin.address);
    h.registry.set_admin(&user.did).unwrap();
    assert_eq!(h.registry.admin().unwrap(), user.did);
}

// ─── Credential verification ────────────────────────────────────────

#[test]
fn issued_credential_verifies_then_revocation_bites() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let vc = credential_json(&issuer, &holder, VC_ID);

    assert!(h.registry.verify_vc(&vc).unwrap());

    h.registry.revoke_vc(VC_ID).unwrap();
    let err = h.registry.verify_vc(&vc).unwrap_err();
    assert_eq!(err.to_string(), "vc is revoked");
    assert_eq!(
        h.registry.get_revoked_vc_list("", 0, 0).unwrap(),
        vec![VC_ID]
    );
}

#[test]
fn unlogged_credential_is_not_issued() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let vc = credential_json(&issuer, &holder, "https://vc.example.com/credentials/other");
    let err = h.registry.verify_vc(&vc).unwrap_err();
    assert_eq!(err.to_string(), "vc is not issued");
}

#[test]
fn issue_log_gate_can_be_disabled() {
    let h = harness(EngineConfig {
        enable_issue_log: false,
        ..EngineConfig::default()
    });
    let admin = actor(1);
    let issuer = actor(2);
    let holder = actor(3);
    h.registry.init_admin(&document_json(&admin)).unwrap();
    h.registry.add_did_document(&document_json(&issuer)).unwrap();
    h.registry.add_did_document(&document_json(&holder)).unwrap();
    h.caller.set(&*admin.address);
    h.registry.add_trust_issuer(&[issuer.did.clone()]).unwrap();
    h.registry
        .set_vc_template("tpl-1", "identity", "Identity", "v1", TEMPLATE_SCHEMA)
        .unwrap();

    // No log entry, yet the credential verifies.
    let vc = credential_json(&issuer, &holder, VC_ID);
    assert!(h.registry.verify_vc(&vc).unwrap());

    // And logging itself is refused.
    assert!(h
        .registry
        .log_vc_issuance(&issuer.did, &holder.did, "tpl-1", VC_ID)
        .is_err());
}

#[test]
fn untrusted_issuer_is_refused() {
    let h = harness(EngineConfig::default());
    let (admin, issuer, holder) = trust_setup(&h);
    h.caller.set(&*admin.address);
    h.registry
        .delete_trust_issuer(&[issuer.did.clone()])
        .unwrap();
    let err = h
        .registry
        .verify_vc(&credential_json(&issuer, &holder, VC_ID))
        .unwrap_err();
    assert_eq!(err.to_string(), "issuer is not in trust issuer list");
}

#[test]
fn expired_credential_is_refused() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let vc = credential_json(&issuer, &holder, VC_ID);
    assert!(h.registry.verify_vc(&vc).unwrap());

    h.clock.set(2_100_000_000); // past 2034-01-01
    let err = h.registry.verify_vc(&vc).unwrap_err();
    assert_eq!(err.to_string(), "vc is expired");
}

#[test]
fn blacklisted_subject_is_refused() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    h.registry.add_black_list(&[holder.did.clone()]).unwrap();
    let err = h
        .registry
        .verify_vc(&credential_json(&issuer, &holder, VC_ID))
        .unwrap_err();
    assert_eq!(err.to_string(), "vc owner is in black list");

    h.registry.delete_black_list(&[holder.did.clone()]).unwrap();
    assert!(h
        .registry
        .verify_vc(&credential_json(&issuer, &holder, VC_ID))
        .unwrap());
}

#[test]
fn subject_violating_template_schema_is_refused() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);

    // Drop the required "name" claim and re-sign.
    let mut vc: Value =
        serde_json::from_str(&credential_json(&issuer, &holder, VC_ID)).unwrap();
    vc["credentialSubject"]
        .as_object_mut()
        .unwrap()
        .remove("name");
    vc.as_object_mut().unwrap().remove("proof");
    sign_into(&mut vc, &issuer, "assertionMethod");
    let err = h
        .registry
        .verify_vc(&serde_json::to_string(&vc).unwrap())
        .unwrap_err();
    assert!(matches!(err, RegistryError::SchemaMismatch(_)));
}

#[test]
fn wrong_leading_type_is_refused() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let mut vc: Value =
        serde_json::from_str(&credential_json(&issuer, &holder, VC_ID)).unwrap();
    vc["type"] = json!(["Identity", "VerifiableCredential"]);
    vc.as_object_mut().unwrap().remove("proof");
    sign_into(&mut vc, &issuer, "assertionMethod");
    let err = h
        .registry
        .verify_vc(&serde_json::to_string(&vc).unwrap())
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid VC type");
}

// ─── Presentations and delegation ───────────────────────────────────

#[test]
fn holder_presents_own_credential() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let vc = credential_json(&issuer, &holder, VC_ID);
    let vp = presentation_json(&holder, &[&vc]);
    assert!(h.registry.verify_vp(&vp).unwrap());
}

#[test]
fn delegation_lifecycle_gates_presentation() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let presenter = actor(4);
    h.registry
        .add_did_document(&document_json(&presenter))
        .unwrap();

    let vc = credential_json(&issuer, &holder, VC_ID);
    let vp = presentation_json(&presenter, &[&vc]);

    // No grant yet.
    let err = h.registry.verify_vp(&vp).unwrap_err();
    assert_eq!(err.to_string(), "no delegate");

    // Holder grants presentation rights for exactly this credential.
    h.caller.set(&*holder.address);
    h.registry
        .delegate(&presenter.did, VC_ID, "sign", NOW + 1_000)
        .unwrap();
    assert!(h.registry.verify_vp(&vp).unwrap());

    let grants = h
        .registry
        .get_delegate_list(&holder.did, "", "", "", 0, 0)
        .unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].delegatee_did, presenter.did);

    // Past the window the grant still exists but is expired.
    h.clock.set(NOW + 2_000);
    let err = h.registry.verify_vp(&vp).unwrap_err();
    assert_eq!(err.to_string(), "delegate is expired");
    h.clock.set(NOW);

    // Revocation removes it entirely; revoking twice is fine.
    h.registry
        .revoke_delegate(&presenter.did, VC_ID, "sign")
        .unwrap();
    h.registry
        .revoke_delegate(&presenter.did, VC_ID, "sign")
        .unwrap();
    let err = h.registry.verify_vp(&vp).unwrap_err();
    assert_eq!(err.to_string(), "no delegate");
}

#[test]
fn never_expiring_delegation() {
    let h = harness(EngineConfig::default());
    let (_admin, _issuer, holder) = trust_setup(&h);
    let presenter = actor(4);
    h.registry
        .add_did_document(&document_json(&presenter))
        .unwrap();
    h.caller.set(&*holder.address);
    h.registry.delegate(&presenter.did, VC_ID, "sign", 0).unwrap();

    h.clock.set(2_000_000_000);
    let grants = h
        .registry
        .get_delegate_list(&holder.did, &presenter.did, VC_ID, "sign", 0, 0)
        .unwrap();
    assert_eq!(grants[0].expiration, i64::MAX);
    assert!(grants[0].active_at(2_000_000_000));
}

#[test]
fn embedded_credential_failure_is_wrapped() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let vc = credential_json(&issuer, &holder, VC_ID);
    let vp = presentation_json(&holder, &[&vc]);
    h.registry.revoke_vc(VC_ID).unwrap();

    // Bare credential verification reports the failure directly; through a
    // presentation the same failure arrives wrapped.
    assert_eq!(
        h.registry.verify_vc(&vc).unwrap_err().to_string(),
        "vc is revoked"
    );
    assert_eq!(
        h.registry.verify_vp(&vp).unwrap_err().to_string(),
        "invalid vc: vc is revoked"
    );
}

#[test]
fn blacklisted_presenter_is_refused() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let vc = credential_json(&issuer, &holder, VC_ID);
    let vp = presentation_json(&holder, &[&vc]);
    h.registry.add_black_list(&[holder.did.clone()]).unwrap();
    let err = h.registry.verify_vp(&vp).unwrap_err();
    assert_eq!(err.to_string(), "vp owner is in black list");
}

#[test]
fn non_authentication_proof_purpose_is_refused() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    let vc = credential_json(&issuer, &holder, VC_ID);
    let mut vp: Value = serde_json::from_str(&presentation_json(&holder, &[&vc])).unwrap();
    vp.as_object_mut().unwrap().remove("proof");
    sign_into(&mut vp, &holder, "assertionMethod");
    let err = h
        .registry
        .verify_vp(&serde_json::to_string(&vp).unwrap())
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPresentation(_)));
}

// ─── Trust lists, issuance log, events ──────────────────────────────

#[test]
fn trust_root_list_bulk_replace() {
    let h = harness(EngineConfig::default());
    let (admin, issuer, holder) = trust_setup(&h);
    h.registry
        .set_trust_root_list(&[admin.did.clone(), issuer.did.clone()])
        .unwrap();
    assert_eq!(
        h.registry.get_trust_root_list().unwrap(),
        vec![admin.did.clone(), issuer.did.clone()]
    );
    h.registry
        .set_trust_root_list(&[holder.did.clone()])
        .unwrap();
    assert_eq!(h.registry.get_trust_root_list().unwrap(), vec![holder.did]);

    // An unregistered DID rejects the whole replacement.
    assert!(h
        .registry
        .set_trust_root_list(&["did:vdrx:unregistered".into()])
        .is_err());
}

#[test]
fn batch_mutation_is_all_or_nothing() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, _holder) = trust_setup(&h);

    // One bad DID in the batch: no entry lands.
    let err = h
        .registry
        .add_trust_issuer(&[issuer.did.clone(), "did:vdrx:unregistered".into()])
        .unwrap_err();
    assert!(matches!(err, RegistryError::DidNotFound));
    // Only the entry from trust_setup remains.
    assert_eq!(h.registry.get_trust_issuer("", 0, 0).unwrap().len(), 1);

    let err = h
        .registry
        .add_black_list(&["did:vdrx:ok0000000000000000000000000000000000000".into(), "bad".into()])
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidDid));
    assert!(h.registry.get_black_list("", 0, 0).unwrap().is_empty());
}

#[test]
fn issue_log_queries_and_issuers() {
    let h = harness(EngineConfig::default());
    let (admin, issuer, holder) = trust_setup(&h);

    // A second trusted issuer logs another credential for the same holder.
    let issuer2 = actor(5);
    h.registry
        .add_did_document(&document_json(&issuer2))
        .unwrap();
    h.caller.set(&*admin.address);
    h.registry.add_trust_issuer(&[issuer2.did.clone()]).unwrap();
    h.caller.set(&*issuer2.address);
    h.registry
        .log_vc_issuance(
            &issuer2.did,
            &holder.did,
            "tpl-1",
            "https://vc.example.com/credentials/2",
        )
        .unwrap();

    let all = h
        .registry
        .get_vc_issue_logs("", &holder.did, "", 0, 0)
        .unwrap();
    assert_eq!(all.len(), 2);
    let narrowed = h
        .registry
        .get_vc_issue_logs(&issuer2.did, &holder.did, "tpl-1", 0, 0)
        .unwrap();
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].vc_id, "https://vc.example.com/credentials/2");

    let mut expected = vec![issuer.did.clone(), issuer2.did.clone()];
    expected.sort();
    assert_eq!(h.registry.get_vc_issuers(&holder.did).unwrap(), expected);

    // Only the issuer itself (or the admin) may log.
    h.caller.set(&*holder.address);
    assert!(h
        .registry
        .log_vc_issuance(&issuer.did, &holder.did, "tpl-1", "https://vc.example.com/x")
        .is_err());
}

#[test]
fn operations_emit_their_topics_and_payloads() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    h.registry.revoke_vc(VC_ID).unwrap();
    h.registry
        .set_trust_root_list(&[issuer.did.clone()])
        .unwrap();
    h.registry.add_black_list(&[holder.did.clone()]).unwrap();

    let topics = h.sink.topics();
    assert_eq!(
        topics.iter().filter(|t| *t == "SetDidDocument").count(),
        3
    );
    assert!(topics.contains(&"AddTrustIssuer".to_owned()));
    assert!(topics.contains(&"VcIssueLog".to_owned()));
    assert!(topics.contains(&"RevokeVc".to_owned()));

    let events = h.sink.events();
    let payload_of = |topic: &str| -> Vec<String> {
        events
            .iter()
            .find(|(t, _)| t == topic)
            .map(|(_, payload)| payload.clone())
            .unwrap()
    };

    assert_eq!(
        payload_of("VcIssueLog"),
        vec![
            issuer.did.clone(),
            holder.did.clone(),
            "tpl-1".to_owned(),
            VC_ID.to_owned()
        ]
    );
    assert_eq!(
        payload_of("SetVcTemplate"),
        vec![
            "tpl-1".to_owned(),
            "identity".to_owned(),
            "Identity".to_owned(),
            "v1".to_owned(),
            TEMPLATE_SCHEMA.to_owned()
        ]
    );
    // List-valued payloads carry one JSON-encoded array string.
    assert_eq!(
        payload_of("SetTrustRootList"),
        vec![serde_json::to_string(&[issuer.did.clone()]).unwrap()]
    );
    assert_eq!(
        payload_of("AddBlackList"),
        vec![serde_json::to_string(&[holder.did.clone()]).unwrap()]
    );
}

#[test]
fn delete_batches_validate_before_applying() {
    let h = harness(EngineConfig::default());
    let (_admin, issuer, holder) = trust_setup(&h);
    h.registry.add_black_list(&[holder.did.clone()]).unwrap();

    // One malformed DID rejects the whole delete batch, for both lists.
    let err = h
        .registry
        .delete_trust_issuer(&[issuer.did.clone(), "bad".into()])
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidDid));
    assert_eq!(h.registry.get_trust_issuer("", 0, 0).unwrap().len(), 1);

    let err = h
        .registry
        .delete_black_list(&[holder.did.clone(), "bad".into()])
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidDid));
    assert_eq!(h.registry.get_black_list("", 0, 0).unwrap().len(), 1);
}

#[test]
fn templates_are_versioned_and_searchable() {
    let h = harness(EngineConfig::default());
    let (_admin, _issuer, _holder) = trust_setup(&h);
    h.registry
        .set_vc_template("tpl-1", "identity", "Identity", "v2", TEMPLATE_SCHEMA)
        .unwrap();
    h.registry
        .set_vc_template("tpl-2", "employment", "Employment", "v1", TEMPLATE_SCHEMA)
        .unwrap();

    assert_eq!(
        h.registry.get_vc_template("tpl-1", "v2").unwrap().version,
        "v2"
    );
    assert!(matches!(
        h.registry.get_vc_template("tpl-1", "v9"),
        Err(RegistryError::TemplateNotFound)
    ));
    assert_eq!(
        h.registry.get_vc_template_list("identity", 0, 0).unwrap().len(),
        2
    );
    assert_eq!(h.registry.get_vc_template_list("", 0, 0).unwrap().len(), 3);

    // Schema text that does not compile never lands.
    assert!(h
        .registry
        .set_vc_template("tpl-3", "broken", "Broken", "v1", r#"{"type": 42}"#)
        .is_err());
}

#[test]
fn standards_surface() {
    let h = harness(EngineConfig::default());
    assert_eq!(h.registry.did_method(), "vdrx");
    assert!(h.registry.supports_standard("did-registry"));
    assert!(h.registry.supports_standard("vc-trust"));
    assert!(!h.registry.supports_standard("token-transfer"));
}

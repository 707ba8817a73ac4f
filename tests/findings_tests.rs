use recon_finder::findings::{aggregate, find_entry, run_entry};
use recon_finder::document::parse_jsonl;
use recon_finder::{Document, RecordAnomaly};
use serde_json::json;

fn feed() -> Document {
    Document::from_records(vec![
        json!({"url": "https://a.example.com/index.php?id=1", "title": "Database Error", "tech": ["PHP", "Apache"], "webserver": "Apache/2.4"}),
        json!({"url": "https://a.example.com/other", "title": "Exception thrown", "tech": ["PHP"], "webserver": "Apache/2.4"}),
        json!({"url": "http://b.example.com:80/", "title": "Index of /", "webserver": "nginx"}),
        json!({"url": "https://dev.example.com/", "title": "Login", "tls": {"self_signed": false, "subject_an": ["dev.example.com"]}}),
    ])
}

#[test]
fn duplicate_extractions_keep_first_position() {
    let values = run_entry(&feed(), find_entry("errors").unwrap()).unwrap();
    assert_eq!(values.as_slice(), ["https://a.example.com"]);

    let php = run_entry(&feed(), find_entry("php").unwrap()).unwrap();
    assert_eq!(php.as_slice(), ["https://a.example.com"]);
}

#[test]
fn catalog_categories() {
    let findings = aggregate(&feed());
    assert_eq!(findings.get("titles").unwrap().values.as_slice(), ["http://b.example.com:80"]);
    assert_eq!(findings.get("port_80").unwrap().values.as_slice(), ["http://b.example.com:80"]);
    assert_eq!(findings.get("login").unwrap().values.as_slice(), ["https://dev.example.com"]);
    assert_eq!(findings.get("dev").unwrap().values.as_slice(), ["https://dev.example.com"]);
    assert_eq!(
        findings.get("server_types").unwrap().values.as_slice(),
        [
            "Apache/2.4 (https://a.example.com/index.php?id=1)",
            "Apache/2.4 (https://a.example.com/other)",
            "nginx (http://b.example.com:80/)",
        ]
    );
    assert_eq!(findings.get("subject_alt_names").unwrap().values.as_slice(), ["dev.example.com"]);
}

#[test]
fn empty_categories_are_omitted() {
    let findings = aggregate(&feed());
    // self_signed is false everywhere
    assert!(findings.get("self_signed").is_none());
    assert!(findings.get("tomcat").is_none());
    assert!(findings.buckets.iter().all(|b| !b.values.is_empty()));
}

#[test]
fn self_signed_hosts() {
    let doc = Document::from_records(vec![
        json!({"url": "https://x.example.com:8443/login", "tls": {"self_signed": true}}),
        json!({"url": "https://y.example.com/", "self_signed": true}),
        json!({"url": "https://z.example.com/", "self_signed": false}),
    ]);
    let findings = aggregate(&doc);
    assert_eq!(
        findings.get("self_signed").unwrap().values.as_slice(),
        ["https://x.example.com:8443", "https://y.example.com"]
    );
}

#[test]
fn array_record_contributes_nothing() {
    let text = "{\"url\":\"https://a.example.com/\",\"title\":\"Error\"}\n[{\"url\":\"https://evil.example.com/\",\"title\":\"Error\"}]\n";
    let doc = Document::from_records(parse_jsonl(text).unwrap());
    assert_eq!(doc.record_anomalies(), vec![RecordAnomaly::NotAnObject { index: 1 }]);
    let findings = aggregate(&doc);
    assert_eq!(findings.get("errors").unwrap().values.as_slice(), ["https://a.example.com"]);
}

#[test]
fn scalar_records_do_not_abort() {
    let doc = Document::from_records(vec![
        json!({"url": "https://a.example.com/", "title": "Fehler"}),
        json!("garbage"),
        json!(17),
        json!({"url": "https://b.example.com/", "title": "Error"}),
    ]);
    assert_eq!(doc.record_anomalies().len(), 2);
    let findings = aggregate(&doc);
    assert_eq!(
        findings.get("errors").unwrap().values.as_slice(),
        ["https://b.example.com", "https://a.example.com"]
    );
}

#[test]
fn aggregation_is_deterministic() {
    assert_eq!(aggregate(&feed()), aggregate(&feed()));
}

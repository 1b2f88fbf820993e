use super::*;
use crate::keyvalues::Value;

/// Binary KeyValues for `appinfo { common { name <name> type <kind> } }`,
/// with keys written by `key`.
fn app_blob(name: &str, kind: &str, key: &dyn Fn(&mut Vec<u8>, &str)) -> Vec<u8> {
    let mut out = Vec::new();
    out.push(0x00);
    key(&mut out, "appinfo");
    out.push(0x00);
    key(&mut out, "common");
    out.push(0x01);
    key(&mut out, "name");
    out.extend_from_slice(name.as_bytes());
    out.push(0);
    out.push(0x01);
    key(&mut out, "type");
    out.extend_from_slice(kind.as_bytes());
    out.push(0);
    out.push(0x08);
    out.push(0x08);
    out.push(0x08);
    out
}

fn inline_key(out: &mut Vec<u8>, key: &str) {
    out.extend_from_slice(key.as_bytes());
    out.push(0);
}

const TABLE: [&str; 4] = ["appinfo", "common", "name", "type"];

fn table_key(out: &mut Vec<u8>, key: &str) {
    let index = TABLE.iter().position(|k| *k == key).unwrap() as u32;
    out.extend_from_slice(&index.to_le_bytes());
}

fn push_entry(out: &mut Vec<u8>, app_id: u32, header_len: usize, blob: &[u8]) {
    out.extend_from_slice(&app_id.to_le_bytes());
    out.extend_from_slice(&((header_len + blob.len()) as u32).to_le_bytes());
    out.extend(std::iter::repeat_n(0xAB, header_len));
    out.extend_from_slice(blob);
}

fn build_v28(apps: &[(u32, &str, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC_V28.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    for (id, name, kind) in apps {
        push_entry(&mut out, *id, ENTRY_HEADER_V28, &app_blob(name, kind, &inline_key));
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    out
}

fn build_v29(apps: &[(u32, &str, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC_V29.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    let offset_pos = out.len();
    out.extend_from_slice(&0i64.to_le_bytes());
    for (id, name, kind) in apps {
        push_entry(&mut out, *id, ENTRY_HEADER_V28, &app_blob(name, kind, &table_key));
    }
    out.extend_from_slice(&0u32.to_le_bytes());

    let table_offset = out.len() as i64;
    out[offset_pos..offset_pos + 8].copy_from_slice(&table_offset.to_le_bytes());
    out.extend_from_slice(&(TABLE.len() as u32).to_le_bytes());
    for key in TABLE {
        out.extend_from_slice(key.as_bytes());
        out.push(0);
    }
    out
}

fn name_of(apps: &HashMap<u32, KeyValues>, id: u32) -> Option<&str> {
    apps.get(&id)?
        .get_path(&["appinfo", "common", "name"])
        .and_then(Value::as_str)
}

#[test]
fn reads_v28_entries() {
    let data = build_v28(&[(10, "Counter-Strike", "Game"), (228980, "Steamworks Common Redistributables", "Tool")]);
    let wanted: HashSet<u32> = [10, 228980].into_iter().collect();
    let apps = read_apps(&data, &wanted).unwrap();
    assert_eq!(apps.len(), 2);
    assert_eq!(name_of(&apps, 10), Some("Counter-Strike"));
    assert_eq!(
        apps[&228980]
            .get_path(&["appinfo", "common", "type"])
            .and_then(Value::as_str),
        Some("Tool")
    );
}

#[test]
fn reads_v29_string_table() {
    let data = build_v29(&[(620, "Portal 2", "Game"), (400, "Portal", "Game")]);
    let wanted: HashSet<u32> = [400].into_iter().collect();
    let apps = read_apps(&data, &wanted).unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(name_of(&apps, 400), Some("Portal"));
}

#[test]
fn skips_unwanted_entries() {
    let data = build_v28(&[(1, "One", "Game"), (2, "Two", "Game"), (3, "Three", "Game")]);
    let wanted: HashSet<u32> = [3, 99].into_iter().collect();
    let apps = read_apps(&data, &wanted).unwrap();
    assert_eq!(apps.keys().copied().collect::<Vec<_>>(), vec![3]);
}

#[test]
fn rejects_unknown_magic() {
    let mut data = build_v28(&[]);
    data[0] = 0x99;
    assert!(matches!(
        read_apps(&data, &HashSet::new()),
        Err(VdfError::InvalidMagic(_))
    ));
}

#[test]
fn truncated_entry_is_an_error() {
    let mut data = build_v28(&[(1, "One", "Game")]);
    data.truncate(data.len() - 10);
    let wanted: HashSet<u32> = [1].into_iter().collect();
    assert!(read_apps(&data, &wanted).is_err());
}

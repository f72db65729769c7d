//! First-present-alias field resolution.

use serde_json::Value;

use crate::models::RawRecord;

/// Return the value bound to the first alias whose key exists in `record`.
///
/// Presence is decided by the key alone: `null`, `0`, `""` and `false` are
/// all present values and stop the search. `None` means no alias matched,
/// which is an expected outcome rather than an error.
pub fn resolve<'a, S: AsRef<str>>(record: &'a RawRecord, aliases: &[S]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| record.get(alias.as_ref()))
}

/// Like [`resolve`], but also reports which alias matched.
pub fn resolve_with_alias<'r, 'a, S: AsRef<str>>(
    record: &'r RawRecord,
    aliases: &'a [S],
) -> Option<(&'a str, &'r Value)> {
    aliases.iter().find_map(|alias| {
        let alias = alias.as_ref();
        record.get(alias).map(|value| (alias, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_first_alias_wins() {
        let r = record(json!({"idBuku": "c", "id_buku": "b", "id": "a"}));
        assert_eq!(resolve(&r, &["id", "id_buku", "idBuku"]), Some(&json!("a")));
        assert_eq!(resolve(&r, &["idBuku", "id"]), Some(&json!("c")));
    }

    #[test]
    fn test_later_alias_used_when_earlier_missing() {
        let r = record(json!({"penulis": "Tere Liye"}));
        assert_eq!(
            resolve(&r, &["pengarang", "author", "penulis"]),
            Some(&json!("Tere Liye"))
        );
    }

    #[test]
    fn test_falsy_values_are_present() {
        let r = record(json!({"stok": 0, "available": 9}));
        assert_eq!(resolve(&r, &["stok", "available"]), Some(&json!(0)));

        let r = record(json!({"judul": "", "title": "Negeri 5 Menara"}));
        assert_eq!(resolve(&r, &["judul", "title"]), Some(&json!("")));

        let r = record(json!({"kategori": null, "category": "Sains"}));
        assert_eq!(resolve(&r, &["kategori", "category"]), Some(&Value::Null));
    }

    #[test]
    fn test_absent_when_no_alias_present() {
        let r = record(json!({"penerbit": "Gramedia"}));
        assert_eq!(resolve(&r, &["judul", "title"]), None);
        assert_eq!(resolve::<&str>(&r, &[]), None);
    }

    #[test]
    fn test_resolve_with_alias_reports_key() {
        let r = record(json!({"tahunTerbit": 2005}));
        let (alias, value) = resolve_with_alias(&r, &["tahun", "tahunTerbit"]).unwrap();
        assert_eq!(alias, "tahunTerbit");
        assert_eq!(value, &json!(2005));
    }

    #[test]
    fn test_accepts_owned_alias_lists() {
        let aliases = vec!["title".to_string()];
        let r = record(json!({"title": "Cantik Itu Luka"}));
        assert_eq!(resolve(&r, &aliases), Some(&json!("Cantik Itu Luka")));
    }
}

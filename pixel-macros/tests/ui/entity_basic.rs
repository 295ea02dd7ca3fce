use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::value_object::Version;
use pixel_macros::entity;

#[entity(name = "Account")]
struct AccountRecord {
    owner: String,
}

#[entity(debug = false)]
struct Note {
    id: u64,
    text: String,
}

fn main() {
    let guid = Uuid::new_v4();
    let mut account = AccountRecord::with_guid(guid);
    assert_eq!(AccountRecord::TYPE, "Account");
    assert_eq!(account.guid(), guid);
    assert_eq!(account.id(), 0);
    assert_eq!(account.owner, "");

    account.restore(7, Version::initial().next());
    assert_eq!(account.id(), 7);
    assert_eq!(account.version().value(), 1);
    let _ = format!("{:?}", account.clone());

    // 未显式指定 name 时取结构体名
    assert_eq!(Note::TYPE, "Note");
    let note = Note::with_guid(Uuid::nil());
    assert!(note.text.is_empty());
}

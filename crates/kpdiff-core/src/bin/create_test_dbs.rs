use keepass::{config::DatabaseConfig, db::Node, db::Value, Database, DatabaseKey};
use std::fs::File;
use std::path::PathBuf;

fn entry(title: &str, username: &str, password: &str) -> keepass::db::Entry {
    let mut entry = keepass::db::Entry::new();
    entry.fields.insert("Title".to_string(), Value::Unprotected(title.to_string()));
    entry.fields.insert("UserName".to_string(), Value::Unprotected(username.to_string()));
    entry.fields.insert(
        "Password".to_string(),
        Value::Protected(password.as_bytes().to_vec().into()),
    );
    entry
}

fn set_title(entry: &mut keepass::db::Entry, title: &str) {
    entry.fields.insert("Title".to_string(), Value::Unprotected(title.to_string()));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let mail = entry("Mail", "me@example.com", "hunter2");
    let vpn = entry("VPN", "me", "corp-secret");
    let bank = entry("Bank", "me", "1234");
    let forum = entry("Forum", "handle", "forum-pass");

    // Left: Root > Personal { Mail, Bank } > Work { VPN }
    let mut left = Database::new(DatabaseConfig::default());
    left.meta.database_name = Some("Left snapshot".to_string());
    let mut personal = keepass::db::Group::new("Personal");
    personal.children.push(Node::Entry(mail.clone()));
    personal.children.push(Node::Entry(bank.clone()));
    let mut work = keepass::db::Group::new("Work");
    work.children.push(Node::Entry(vpn));
    personal.children.push(Node::Group(work));
    left.root.children.push(Node::Group(personal));

    // Right: Mail renamed, Bank kept, Work dropped, Social added
    let mut right = Database::new(DatabaseConfig::default());
    right.meta.database_name = Some("Right snapshot".to_string());
    let mut personal = keepass::db::Group::new("Personal");
    let mut renamed_mail = mail;
    set_title(&mut renamed_mail, "Webmail");
    personal.children.push(Node::Entry(renamed_mail));
    personal.children.push(Node::Entry(bank));
    let mut social = keepass::db::Group::new("Social");
    social.children.push(Node::Entry(forum));
    personal.children.push(Node::Group(social));
    right.root.children.push(Node::Group(personal));

    for (name, db) in [("left.kdbx", &left), ("right.kdbx", &right)] {
        let path = out_dir.join(name);
        let key = DatabaseKey::new().with_password("password");
        let mut file = File::create(&path)?;
        db.save(&mut file, key)?;
        println!("Created {} with password 'password'", path.display());
    }

    Ok(())
}

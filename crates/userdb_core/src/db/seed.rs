//! Fixed sample rows loaded at startup.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection};

/// Seed rows as `(name, email, age)`, inserted in this order.
pub const SEED_USERS: &[(&str, &str, i64)] = &[
    ("Anne Bee", "anne.bee@email.com", 27),
    ("Cee Dee", "cee.dee@email.com", 19),
    ("Eri Foo", "eri.foo@email.com", 36),
    ("Gee Hii", "gee.hii@email.com", 25),
    ("Izzy Jay", "izzy.jay@email.com", 29),
    ("Kay Lin", "kay.lin@email.com", 22),
    ("Moe Nan", "moe.nan@email.com", 34),
    ("Ollie Poe", "ollie.poe@email.com", 28),
    ("Quinn Rae", "quinn.rae@email.com", 30),
    ("Sam Tee", "sam.tee@email.com", 23),
    ("Uma Vie", "uma.vie@email.com", 35),
    ("Vic Wu", "vic.wu@email.com", 26),
    ("Xen Yoo", "xen.yoo@email.com", 24),
    ("Yara Zee", "yara.zee@email.com", 29),
    ("Zane Ace", "zane.ace@email.com", 21),
    ("Bryce Dee", "bryce.dee@email.com", 32),
    ("Cora Fee", "cora.fee@email.com", 27),
    ("Duke Gee", "duke.gee@email.com", 33),
    ("Elle Hue", "elle.hue@email.com", 25),
    ("Finn Jay", "finn.jay@email.com", 20),
    ("Gwen Key", "gwen.key@email.com", 31),
    ("Hale Lee", "hale.lee@email.com", 28),
    ("Ivy Mee", "ivy.mee@email.com", 22),
    ("Jude Nee", "jude.nee@email.com", 34),
    ("Kale Oye", "kale.oye@email.com", 26),
];

/// Inserts [`SEED_USERS`] and commits.
///
/// Must run once per process, right after `initialize_schema`. A unique
/// violation here means the seed list itself is broken.
pub fn seed(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO users (name, email, age) VALUES (?1, ?2, ?3);")?;
        for (name, email, age) in SEED_USERS {
            stmt.execute(params![name, email, age])?;
        }
    }
    tx.commit()?;

    info!("event=seed module=db status=ok rows={}", SEED_USERS.len());
    Ok(())
}

use std::io::Write;
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use tempfile::NamedTempFile;

use PlayerDB::config::StoreConfig;
use PlayerDB::store::{IndexedFileStore, RecordStore};

const ROWS: usize = 600;

fn build_file() -> Result<NamedTempFile> {
    let mut f = NamedTempFile::new()?;
    writeln!(f, "playerID,name,bats")?;
    for i in 0..ROWS {
        writeln!(f, "pl{:05},Player {},{}", i, i, if i % 2 == 0 { "R" } else { "L" })?;
    }
    f.flush()?;
    Ok(f)
}

#[test]
fn many_threads_share_one_store() -> Result<()> {
    let f = build_file()?;
    let store: Arc<dyn RecordStore> =
        Arc::new(IndexedFileStore::open(f.path(), StoreConfig::default())?);

    let mut handles = Vec::new();
    for t in 0..8usize {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || -> anyhow::Result<()> {
            for round in 0..50usize {
                // point reads interleaved with page reads on the same cursor
                let i = (t * 97 + round * 13) % ROWS;
                let key = format!("pl{:05}", i);
                let rec = store.get_by_key(&key)?.expect("key must exist");
                assert_eq!(rec.get("playerID"), Some(key.as_str()));
                assert_eq!(rec.get("name"), Some(format!("Player {}", i).as_str()));

                let limit = 1 + (t + round) % 40;
                let max_page = (ROWS + limit - 1) / limit;
                let n = 1 + (t * 31 + round) % max_page;
                let page = store.get_page(n, limit)?;
                let start = (n - 1) * limit;
                assert_eq!(page.len(), limit.min(ROWS - start));
                for (j, r) in page.records().iter().enumerate() {
                    let want = format!("pl{:05}", start + j);
                    assert_eq!(r.get("playerID"), Some(want.as_str()));
                }

                assert!(store.get_by_key("missing")?.is_none());
            }
            Ok(())
        }));
    }

    for h in handles {
        h.join().expect("reader thread panicked")?;
    }
    assert_eq!(store.total_count(), ROWS);
    Ok(())
}

#[test]
fn reload_while_reading_is_all_or_nothing() -> Result<()> {
    let a = build_file()?;
    let mut b = NamedTempFile::new()?;
    writeln!(b, "playerID,name,bats")?;
    for i in 0..10 {
        writeln!(b, "other{},X,R", i)?;
    }
    b.flush()?;

    let store = Arc::new(IndexedFileStore::open(a.path(), StoreConfig::default())?);
    let b_path = b.path().to_path_buf();

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || -> anyhow::Result<()> {
            for _ in 0..200 {
                // Either the old or the new index, never a mix.
                let n = store.total_count();
                assert!(n == ROWS || n == 10, "unexpected count {n}");
                let p = store.page(1, 5)?;
                assert!(p.total_count == ROWS || p.total_count == 10);
                let first = p.records()[0].get("playerID").unwrap_or_default().to_string();
                if p.total_count == ROWS {
                    assert_eq!(first, "pl00000");
                } else {
                    assert_eq!(first, "other0");
                }
            }
            Ok(())
        })
    };

    store.load(&b_path)?;
    reader.join().expect("reader panicked")?;
    assert_eq!(store.total_count(), 10);
    Ok(())
}

//! Minimal RESP server for exercising `RedisStore` without a real Redis.
//!
//! Understands `PING`, `GET`, `INCR`; anything else (the client's
//! `CLIENT SETINFO` handshake) gets `+OK`.

#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone, Default)]
pub struct FakeRedisOptions {
    /// Hang up on the first connection right after answering its first PING.
    pub close_first_after_ping: bool,
    /// Answer PING with an error reply.
    pub fail_ping: bool,
    /// Never answer anything.
    pub silent: bool,
    /// Never answer GET/INCR.
    pub stall_commands: bool,
    /// Keys that hold a non-string type.
    pub wrongtype_keys: Vec<String>,
}

pub struct FakeRedis {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl FakeRedis {
    pub async fn start(opts: FakeRedisOptions) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let values = Arc::new(Mutex::new(HashMap::new()));

        let (count, shared) = (Arc::clone(&accepted), Arc::clone(&values));
        tokio::spawn(async move {
            while let Ok((sock, _)) = listener.accept().await {
                let conn_no = count.fetch_add(1, Ordering::SeqCst) + 1;
                tokio::spawn(serve(sock, conn_no, opts.clone(), Arc::clone(&shared)));
            }
        });

        Self { addr, accepted, values }
    }

    pub fn url(&self) -> String {
        format!("redis://{}/", self.addr)
    }

    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub fn set(&self, key: &str, value: &str) {
        self.values.lock().unwrap().insert(key.to_string(), value.to_string());
    }
}

/// A local address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("redis://{addr}/")
}

async fn read_command(reader: &mut BufReader<OwnedReadHalf>) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let n: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut args = Vec::with_capacity(n);
    for _ in 0..n {
        line.clear();
        reader.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut buf = vec![0u8; len + 2];
        reader.read_exact(&mut buf).await.ok()?;
        buf.truncate(len);
        args.push(String::from_utf8(buf).ok()?);
    }
    Some(args)
}

const WRONGTYPE: &str = "-WRONGTYPE Operation against a key holding the wrong kind of value\r\n";

fn reply(
    cmd: &str,
    args: &[String],
    opts: &FakeRedisOptions,
    values: &Mutex<HashMap<String, String>>,
) -> String {
    let key = args.get(1).cloned().unwrap_or_default();
    let wrongtype = opts.wrongtype_keys.contains(&key);
    let mut values = values.lock().unwrap();

    match cmd {
        "PING" if opts.fail_ping => "-ERR ping disabled\r\n".to_string(),
        "PING" => "+PONG\r\n".to_string(),
        "GET" if wrongtype => WRONGTYPE.to_string(),
        "GET" => match values.get(&key) {
            Some(v) => format!("${}\r\n{}\r\n", v.len(), v),
            None => "$-1\r\n".to_string(),
        },
        "INCR" if wrongtype => WRONGTYPE.to_string(),
        "INCR" => {
            let current = values.get(&key).cloned().unwrap_or_else(|| "0".to_string());
            match current.parse::<i64>() {
                Ok(n) => {
                    values.insert(key, (n + 1).to_string());
                    format!(":{}\r\n", n + 1)
                }
                Err(_) => "-ERR value is not an integer or out of range\r\n".to_string(),
            }
        }
        _ => "+OK\r\n".to_string(),
    }
}

async fn serve(
    sock: TcpStream,
    conn_no: usize,
    opts: FakeRedisOptions,
    values: Arc<Mutex<HashMap<String, String>>>,
) {
    let (rd, mut wr) = sock.into_split();
    let mut reader = BufReader::new(rd);

    while let Some(args) = read_command(&mut reader).await {
        let cmd = args.first().map(|s| s.to_ascii_uppercase()).unwrap_or_default();
        if opts.silent || (opts.stall_commands && (cmd == "GET" || cmd == "INCR")) {
            continue;
        }

        let out = reply(&cmd, &args, &opts, &values);
        if wr.write_all(out.as_bytes()).await.is_err() {
            return;
        }
        if cmd == "PING" && conn_no == 1 && opts.close_first_after_ping {
            return;
        }
    }
}

//! 콘솔 리포터
//!
//! 메시지 키 + 이름 있는 치환 값으로 출력하는 레벨별 리포팅 싱크.
//! 포맷 실패(없는 키, 빠진 인자)는 내부 에러로 출력하고 계속 진행함. 호출자를 panic시키지 않음.
//!
//! 코덱은 이 모듈에 의존하지 않음. 바이너리나 상위 계층이 묶어서 사용.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::io::{self, Write};

use chrono::{DateTime, Local, TimeZone};
use parking_lot::Mutex;

use crate::ReporterConfig;

/// 출력 스트림
pub type Sink = Box<dyn Write + Send>;

/// 치환 값 목록: (이름, 값)
pub type Args<'a> = &'a [(&'a str, &'a dyn Display)];

/// 기본 내부 포맷 문자열. 사용자 테이블로 덮어쓸 수 있음
const INTERNAL_FORMATS: &[(&str, &str)] = &[
    ("err_msg", "Error [{err_code}]: {err_msg}"),
    ("err_no_fmt_str", "Could not find format string with key '{fmt_key}'"),
    (
        "err_fmt_no_key",
        "Missing value for format argument '{fmt_arg}' in format string '{bad_key}'",
    ),
];

/// 터미널 색상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Default,
}

impl Color {
    /// ANSI 이스케이프 시퀀스
    pub fn code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::Default => "\x1b[39m",
        }
    }
}

/// 리포트 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn color(self) -> Color {
        match self {
            Level::Success => Color::Green,
            Level::Info => Color::Cyan,
            Level::Warning => Color::Yellow,
            Level::Error => Color::Red,
        }
    }

    /// stderr로 나가는 레벨
    pub fn is_error_stream(self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        f.write_str(name)
    }
}

/// 치환 실패 이유
#[derive(Debug, PartialEq, Eq)]
struct MissingArg(String);

/// `{name}` 치환. `{{`, `}}`는 중괄호 그대로
///
/// `{name:>4}`, `{name!r}` 같은 포맷 지정은 받아들이되 적용하지 않음 (값의 `Display` 그대로).
fn substitute(fmt_str: &str, args: Args<'_>) -> std::result::Result<String, MissingArg> {
    let mut out = String::with_capacity(fmt_str.len());
    let mut chars = fmt_str.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(MissingArg(name));
                }
                // `:spec`, `!conv` 부분은 무시하고 이름만으로 찾음
                let field = match name.find([':', '!']) {
                    Some(end) => &name[..end],
                    None => name.as_str(),
                };
                match args.iter().find(|(key, _)| *key == field) {
                    Some((_, value)) => out.push_str(&value.to_string()),
                    None => return Err(MissingArg(field.to_string())),
                }
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

/// `HH:MM:SS.ffffff` (호출 측 시간대 기준)
fn timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    now.format("%H:%M:%S%.6f").to_string()
}

/// 콘솔 리포터
///
/// 출력은 `&self`로 가능 (스트림은 내부 잠금). 설정 토글은 `&mut self`.
pub struct Reporter {
    config: ReporterConfig,
    fmt_strings: HashMap<String, String>,
    stdout: Mutex<Sink>,
    stderr: Mutex<Sink>,
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("config", &self.config)
            .field("fmt_strings", &self.fmt_strings.len())
            .finish()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(ReporterConfig::default())
    }
}

impl Reporter {
    /// stdout/stderr로 출력하는 리포터
    pub fn new(config: ReporterConfig) -> Self {
        Self::with_sinks(config, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// 출력 스트림 지정
    pub fn with_sinks(config: ReporterConfig, stdout: Sink, stderr: Sink) -> Self {
        let fmt_strings = INTERNAL_FORMATS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self {
            config,
            fmt_strings,
            stdout: Mutex::new(stdout),
            stderr: Mutex::new(stderr),
        }
    }

    /// 포맷 문자열 추가 (같은 키는 덮어씀, 내부 키 포함)
    pub fn with_formats<K, V>(mut self, formats: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fmt_strings
            .extend(formats.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn config(&self) -> ReporterConfig {
        self.config
    }

    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    pub fn enable_color(&mut self) {
        self.config.colorize = true;
    }

    pub fn disable_color(&mut self) {
        self.config.colorize = false;
    }

    pub fn success(&self, key: &str, args: Args<'_>) {
        self.log(Level::Success, key, args);
    }

    pub fn info(&self, key: &str, args: Args<'_>) {
        self.log(Level::Info, key, args);
    }

    pub fn warning(&self, key: &str, args: Args<'_>) {
        self.log(Level::Warning, key, args);
    }

    pub fn error(&self, key: &str, args: Args<'_>) {
        self.log(Level::Error, key, args);
    }

    /// 메시지 출력
    pub fn log(&self, level: Level, key: &str, args: Args<'_>) {
        if !self.config.enabled {
            return;
        }
        let msg = self.format(key, args);
        self.emit(level, &msg);
    }

    /// 키로 포맷 문자열을 찾아 치환
    ///
    /// 키가 없으면 키 자체를, 인자가 빠지면 원본 포맷 문자열을 돌려줌.
    pub fn format(&self, key: &str, args: Args<'_>) -> String {
        let Some(fmt_str) = self.fmt_strings.get(key) else {
            self.internal_error("err_no_fmt_str", &[("fmt_key", &key)]);
            return key.to_string();
        };

        match substitute(fmt_str, args) {
            Ok(msg) => msg,
            Err(MissingArg(name)) => {
                self.internal_error("err_fmt_no_key", &[("fmt_arg", &name), ("bad_key", &key)]);
                fmt_str.clone()
            }
        }
    }

    /// 리포터 자신의 에러. 여기서 실패하면 다시 리포트하지 않고 기본 문구로 대체
    fn internal_error(&self, err_code: &str, args: Args<'_>) {
        if !self.config.enabled {
            return;
        }

        let err_msg = self
            .fmt_strings
            .get(err_code)
            .and_then(|fmt_str| {
                let mut all: Vec<(&str, &dyn Display)> = args.to_vec();
                all.push(("err_code", &err_code));
                substitute(fmt_str, &all).ok()
            })
            .unwrap_or_else(|| err_code.to_string());

        let wrapped = self
            .fmt_strings
            .get("err_msg")
            .and_then(|fmt_str| {
                substitute(fmt_str, &[("err_code", &err_code), ("err_msg", &err_msg)]).ok()
            })
            .unwrap_or_else(|| format!("Error [{}]: {}", err_code, err_msg));

        self.emit(Level::Error, &wrapped);
    }

    /// 색상/타임스탬프 적용 후 스트림에 기록. IO 에러는 무시
    fn emit(&self, level: Level, msg: &str) {
        match level {
            Level::Success | Level::Info => {
                tracing::info!(target: "sfp_packet::report", %level, "{}", msg)
            }
            Level::Warning => tracing::warn!(target: "sfp_packet::report", "{}", msg),
            Level::Error => tracing::error!(target: "sfp_packet::report", "{}", msg),
        }

        let mut line = if self.config.colorize {
            format!("{}{}{}", level.color().code(), msg, Color::Default.code())
        } else {
            msg.to_string()
        };

        if self.config.timestamps {
            line = format!("{} {}", timestamp(&Local::now()), line);
        }

        let sink = if level.is_error_stream() {
            &self.stderr
        } else {
            &self.stdout
        };

        let mut sink = sink.lock();
        let _ = writeln!(sink, "{}", line);
        let _ = sink.flush();
    }
}

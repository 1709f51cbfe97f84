//! The line-oriented text format.
//!
//! ```text
//! 3
//! Stop Tolstopaltsevo: 55.611087, 37.20829, 3900m to Marushkino
//! Stop Marushkino: 55.595884, 37.209755
//! Bus 256: Tolstopaltsevo > Marushkino > Tolstopaltsevo
//! 2
//! Bus 256
//! Stop Marushkino
//! ```
//!
//! Stop lists separated by `>` describe circular buses and must repeat the
//! first stop at the end; lists separated by `-` describe linear ones.
//! Only bus and stop queries exist in this format.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Lines;

use super::{FormatError, RequestFormat};
use crate::requests::{BaseRequest, RequestDocument, ResponsePayload, StatRequest, StatResponse};

const CIRCULAR_SEPARATOR: &str = " > ";
const LINEAR_SEPARATOR: &str = " - ";
const DISTANCE_INFIX: &str = "m to ";

#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormat;

impl RequestFormat for TextFormat {
    fn parse(&self, input: &[u8]) -> Result<RequestDocument, FormatError> {
        let text = std::str::from_utf8(input)?;
        let mut lines = LineReader::new(text);

        let base_count = lines.count()?;
        let mut base_requests = Vec::with_capacity(base_count);
        for _ in 0..base_count {
            let (number, line) = lines.next_line()?;
            base_requests.push(parse_base_request(number, line)?);
        }

        // The query section may be missing entirely
        let mut stat_requests = Vec::new();
        if lines.has_more() {
            let stat_count = lines.count()?;
            for id in 0..stat_count {
                let (number, line) = lines.next_line()?;
                stat_requests.push(parse_stat_request(number, id as i64, line)?);
            }
        }

        Ok(RequestDocument {
            base_requests,
            stat_requests,
            ..RequestDocument::default()
        })
    }

    fn render(&self, requests: &[StatRequest], responses: &[StatResponse]) -> Result<Vec<u8>, FormatError> {
        let mut out = String::new();

        for (request, response) in requests.iter().zip(responses) {
            match (request, &response.payload) {
                (StatRequest::BusStat { name, .. }, ResponsePayload::Bus(stat)) => {
                    writeln!(
                        out,
                        "Bus {name}: {} stops on route, {} unique stops, {} route length, {:.6} curvature",
                        stat.stop_count, stat.unique_stop_count, stat.route_length, stat.curvature
                    )?;
                }
                (StatRequest::BusStat { name, .. }, _) => {
                    writeln!(out, "Bus {name}: not found")?;
                }
                (StatRequest::StopStat { name, .. }, ResponsePayload::Stop(stat)) => {
                    if stat.buses.is_empty() {
                        writeln!(out, "Stop {name}: no buses")?;
                    } else {
                        writeln!(out, "Stop {name}: buses {}", stat.buses.join(" "))?;
                    }
                }
                (StatRequest::StopStat { name, .. }, _) => {
                    writeln!(out, "Stop {name}: not found")?;
                }
                (StatRequest::Route { .. }, _) => return Err(FormatError::Unsupported("Route")),
                (StatRequest::MapRender { .. }, _) => return Err(FormatError::Unsupported("Map")),
            }
        }

        Ok(out.into_bytes())
    }
}

/// Numbered lines, skipping blank ones.
struct LineReader<'a> {
    lines: Peekable<std::iter::Enumerate<Lines<'a>>>,
    last: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            last: 0,
        }
    }

    fn skip_blank(&mut self) {
        while self
            .lines
            .peek()
            .is_some_and(|(_, line)| line.trim().is_empty())
        {
            self.lines.next();
        }
    }

    fn has_more(&mut self) -> bool {
        self.skip_blank();
        self.lines.peek().is_some()
    }

    fn next_line(&mut self) -> Result<(usize, &'a str), FormatError> {
        self.skip_blank();
        match self.lines.next() {
            Some((index, line)) => {
                self.last = index + 1;
                Ok((index + 1, line.trim()))
            }
            None => Err(FormatError::syntax(self.last + 1, "unexpected end of input")),
        }
    }

    fn count(&mut self) -> Result<usize, FormatError> {
        let (number, line) = self.next_line()?;
        line.parse()
            .map_err(|_| FormatError::syntax(number, format!("expected a request count, got {line:?}")))
    }
}

fn parse_base_request(number: usize, line: &str) -> Result<BaseRequest, FormatError> {
    let (kind, rest) = line
        .split_once(' ')
        .ok_or_else(|| FormatError::syntax(number, "expected `Stop NAME: ...` or `Bus NAME: ...`"))?;
    let (name, body) = rest
        .split_once(':')
        .ok_or_else(|| FormatError::syntax(number, "missing `:` after the name"))?;
    let name = non_empty(number, name, "name")?;

    match kind {
        "Stop" => parse_stop(number, name, body),
        "Bus" => parse_bus(number, name, body),
        other => Err(FormatError::syntax(number, format!("unknown request kind {other:?}"))),
    }
}

fn parse_stop(number: usize, name: String, body: &str) -> Result<BaseRequest, FormatError> {
    let mut fields = body.split(',');
    let mut coordinate = |what: &str| -> Result<f64, FormatError> {
        let field = fields.next().unwrap_or("").trim();
        field
            .parse()
            .map_err(|_| FormatError::syntax(number, format!("invalid {what} {field:?}")))
    };
    let latitude = coordinate("latitude")?;
    let longitude = coordinate("longitude")?;

    let mut road_distances = BTreeMap::new();
    for field in fields {
        let field = field.trim();
        let (meters, to) = field
            .split_once(DISTANCE_INFIX)
            .ok_or_else(|| FormatError::syntax(number, format!("expected `Dm to NAME`, got {field:?}")))?;
        let meters: u32 = meters
            .trim()
            .parse()
            .map_err(|_| FormatError::syntax(number, format!("invalid distance {meters:?}")))?;
        road_distances.insert(non_empty(number, to, "stop name")?, meters);
    }

    Ok(BaseRequest::Stop {
        name,
        latitude,
        longitude,
        road_distances,
    })
}

fn parse_bus(number: usize, name: String, body: &str) -> Result<BaseRequest, FormatError> {
    let body = body.trim();
    let (separator, is_roundtrip) = if body.contains(CIRCULAR_SEPARATOR) {
        (CIRCULAR_SEPARATOR, true)
    } else {
        (LINEAR_SEPARATOR, false)
    };

    let stops = body
        .split(separator)
        .map(|stop| non_empty(number, stop, "stop name"))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BaseRequest::Bus {
        name,
        stops,
        is_roundtrip,
    })
}

fn parse_stat_request(number: usize, id: i64, line: &str) -> Result<StatRequest, FormatError> {
    let (kind, name) = line
        .split_once(' ')
        .ok_or_else(|| FormatError::syntax(number, "expected `Bus NAME` or `Stop NAME`"))?;
    let name = non_empty(number, name, "name")?;

    match kind {
        "Bus" => Ok(StatRequest::BusStat { id, name }),
        "Stop" => Ok(StatRequest::StopStat { id, name }),
        other => Err(FormatError::syntax(number, format!("unknown query kind {other:?}"))),
    }
}

fn non_empty(number: usize, field: &str, what: &str) -> Result<String, FormatError> {
    let field = field.trim();
    if field.is_empty() {
        Err(FormatError::syntax(number, format!("empty {what}")))
    } else {
        Ok(field.to_string())
    }
}

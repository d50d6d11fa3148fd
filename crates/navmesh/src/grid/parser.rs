//! `.map` file parsing (§4.4).
//!
//! Header grammar (whitespace-separated tokens): the three fields `type`,
//! `width`, `height` as key/value pairs in any order, then the literal
//! keyword `map`, then exactly `H*W` non-whitespace cell characters
//! (whitespace skipped between cells). Any mismatch is fatal.
//!
//! The three header fields are order-independent — mirroring
//! `gridmap2rects.cpp`'s `read_map`, which reads them into a map keyed by
//! field name rather than expecting a fixed sequence — so `height 4\nwidth
//! 4` parses the same as `width 4\nheight 4`.

use anyhow::{bail, Context, Result};

use super::types::GridSession;

const OBSTACLE_CHARS: &[char] = &['S', 'W', 'T', '@', 'O'];

pub fn parse_map(input: &str) -> Result<GridSession> {
    let mut tokens = input.split_whitespace();

    let mut map_type: Option<String> = None;
    let mut width: Option<usize> = None;
    let mut height: Option<usize> = None;

    for _ in 0..3 {
        let key = tokens
            .next()
            .context("map has bad header: expected 'type', 'width', or 'height'")?;
        let value = tokens
            .next()
            .with_context(|| format!("map has bad header: missing value for '{key}'"))?;
        match key {
            "type" if map_type.is_none() => map_type = Some(value.to_owned()),
            "width" if width.is_none() => {
                width = Some(value.parse().context("map has bad width")?);
            }
            "height" if height.is_none() => {
                height = Some(value.parse().context("map has bad height")?);
            }
            "type" | "width" | "height" => {
                bail!("map has bad header: duplicate field '{key}'");
            }
            _ => bail!("map has bad header: unexpected field '{key}'"),
        }
    }

    let map_type = map_type.context("map has bad header: missing 'type'")?;
    if map_type != "octile" {
        bail!("map type is not octile");
    }
    let width = width.context("map has bad header: missing 'width'")?;
    let height = height.context("map has bad header: missing 'height'")?;
    if width == 0 || height == 0 {
        bail!("map has bad dimensions");
    }

    let keyword = tokens.next().context("map is missing 'map' keyword")?;
    if keyword != "map" {
        bail!("map does not have 'map' keyword");
    }

    // The remaining input is the body; re-scan the original string for the
    // body's raw characters (the header was consumed as whitespace-delimited
    // tokens, but the body may run tokens together, e.g. "...." is one
    // token of four cells).
    let body_start = locate_body_start(input, 7)?;
    let mut traversable = vec![vec![false; width]; height];
    let mut cur_y = 0usize;
    let mut cur_x = 0usize;
    for c in input[body_start..].chars() {
        if c.is_whitespace() {
            continue;
        }
        if cur_y == height {
            bail!("map has too many characters");
        }
        traversable[cur_y][cur_x] = !OBSTACLE_CHARS.contains(&c);
        cur_x += 1;
        if cur_x == width {
            cur_x = 0;
            cur_y += 1;
        }
    }
    if cur_y != height || cur_x != 0 {
        bail!("map has too few characters");
    }

    Ok(GridSession::new(height, width, traversable))
}

/// Skip past the first `n` whitespace-delimited tokens and return the byte
/// offset of whatever follows (the start of the body).
fn locate_body_start(input: &str, n: usize) -> Result<usize> {
    let mut seen = 0usize;
    let mut in_token = false;
    for (i, c) in input.char_indices() {
        if c.is_whitespace() {
            in_token = false;
        } else if !in_token {
            in_token = true;
            seen += 1;
            if seen == n + 1 {
                return Ok(i);
            }
        }
    }
    bail!("map is missing body after header")
}

/// 可安全移除前後空白的符號
const TIGHT_AFTER: &[char] = &['{', '}', ';', ',', '>', ':'];
const TIGHT_AROUND: &[char] = &['{', '}', ';', ',', '>'];

/// 壓縮樣式表：移除註解（保留 `/*!`）、合併空白、去除區塊內最後一個分號。
/// 字串內容保持原樣。
pub fn minify_css(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let end = find_comment_end(&chars, i + 2);
            if chars.get(i + 2) == Some(&'!') {
                flush_space(&mut out, &mut pending_space);
                out.extend(&chars[i..end]);
            } else {
                pending_space = true;
            }
            i = end;
            continue;
        }

        if c == '"' || c == '\'' {
            flush_space(&mut out, &mut pending_space);
            i = copy_string(&chars, i, &mut out);
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            i += 1;
            continue;
        }

        if TIGHT_AROUND.contains(&c) {
            pending_space = false;
            if c == '}' && out.ends_with(';') {
                out.pop();
            }
            out.push(c);
            i += 1;
            continue;
        }

        flush_space(&mut out, &mut pending_space);
        out.push(c);
        i += 1;
    }

    out
}

fn flush_space(out: &mut String, pending_space: &mut bool) {
    if *pending_space {
        if let Some(last) = out.chars().last() {
            if !TIGHT_AFTER.contains(&last) {
                out.push(' ');
            }
        }
        *pending_space = false;
    }
}

/// 回傳註解結尾之後的索引；未結束的註解延伸到輸入結尾
fn find_comment_end(chars: &[char], from: usize) -> usize {
    let mut j = from;
    while j + 1 < chars.len() {
        if chars[j] == '*' && chars[j + 1] == '/' {
            return j + 2;
        }
        j += 1;
    }
    chars.len()
}

fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push(quote);
    let mut j = start + 1;
    while j < chars.len() {
        let c = chars[j];
        out.push(c);
        if c == '\\' {
            if let Some(&escaped) = chars.get(j + 1) {
                out.push(escaped);
                j += 2;
                continue;
            }
        }
        j += 1;
        if c == quote {
            break;
        }
    }
    j
}

//! HTMLレンダリング
//!
//! `View`（ゲートの状態遷移が返す表示内容）からHTML文書を生成する純粋関数群。
//! 動的な値はすべて `escape_html` を通してから埋め込む。

use std::borrow::Cow;

/// 表示する画面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// ログインフォーム
    Login {
        /// 表示するエラーメッセージ
        error_message: Option<String>,
        /// メール欄に再表示する値
        email: String,
    },
    /// ダッシュボード（iframe + ログアウトボタン）
    Dashboard,
}

impl View {
    /// エラーなしのログインフォーム
    pub fn login() -> Self {
        View::Login {
            error_message: None,
            email: String::new(),
        }
    }
}

/// 画面に共通する設定値
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// ページタイトル
    pub title: &'a str,
    /// フォームの送信先（ゲート自身のURL）
    pub action: &'a str,
    /// iframeに埋め込むURL
    pub dashboard_url: &'a str,
}

/// HTML特殊文字をエスケープする（`& < > " '`）
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut escaped = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

const STYLE: &str = r#"
        body {
            font-family: 'Inter', system-ui, sans-serif;
            background-color: #f3f4f6;
            margin: 0;
            min-height: 100vh;
        }
        body.gate-login {
            display: flex;
            align-items: center;
            justify-content: center;
            padding: 20px;
            box-sizing: border-box;
        }
        #login-card {
            background: #fff;
            padding: 2rem;
            border-radius: 0.75rem;
            box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25);
            width: 100%;
            max-width: 28rem;
        }
        #login-card h1 { font-size: 1.875rem; color: #1f2937; text-align: center; margin: 0 0 1.5rem; }
        #login-card p { color: #4b5563; text-align: center; margin: 0 0 2rem; }
        #login-card label { display: block; font-size: 0.875rem; color: #374151; margin-bottom: 0.5rem; }
        #login-card input {
            width: 100%;
            box-sizing: border-box;
            padding: 0.5rem 1rem;
            border: 1px solid #d1d5db;
            border-radius: 0.5rem;
            margin-bottom: 1.25rem;
        }
        #error-message {
            font-size: 0.875rem;
            color: #dc2626;
            background: #fef2f2;
            border: 1px solid #fecaca;
            border-radius: 0.5rem;
            padding: 0.5rem;
            margin-bottom: 1rem;
        }
        #login-card button {
            width: 100%;
            background: #2563eb;
            color: #fff;
            padding: 0.625rem;
            border: 0;
            border-radius: 0.5rem;
            font-weight: 600;
            cursor: pointer;
        }
        #dashboard-container {
            position: relative;
            width: 100%;
            height: 100vh;
        }
        #dashboard-container form {
            position: absolute;
            top: 1rem;
            right: 1rem;
            z-index: 10;
        }
        #dashboard-container button {
            background: #374151;
            color: #fff;
            font-size: 0.875rem;
            padding: 0.25rem 0.75rem;
            border: 0;
            border-radius: 0.5rem;
            cursor: pointer;
        }
        #dashboard-container iframe {
            width: 100%;
            height: 100%;
            border: 0;
        }
"#;

/// 画面をHTML文書として出力する
pub fn render(view: &View, ctx: &PageContext<'_>) -> String {
    let (body_class, body) = match view {
        View::Login {
            error_message,
            email,
        } => ("gate-login", render_login(ctx, error_message.as_deref(), email)),
        View::Dashboard => ("gate-dashboard", render_dashboard(ctx)),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body class="{body_class}">
{body}
</body>
</html>
"#,
        title = escape_html(ctx.title),
        style = STYLE,
        body_class = body_class,
        body = body,
    )
}

fn render_login(ctx: &PageContext<'_>, error_message: Option<&str>, email: &str) -> String {
    let error_block = match error_message {
        Some(message) if !message.is_empty() => format!(
            r#"            <div id="error-message">{}</div>
"#,
            escape_html(message)
        ),
        _ => String::new(),
    };

    format!(
        r#"    <div id="login-card">
        <h1>{title}</h1>
        <p>Authentication required to view this dashboard.</p>

        <form method="POST" action="{action}">
            <label for="email">Email Address</label>
            <input type="email" id="email" name="email" required placeholder="Enter your email" value="{email}">

            <label for="password">Password</label>
            <input type="password" id="password" name="password" required placeholder="Enter your password">

{error_block}            <button type="submit">Sign In</button>
        </form>
    </div>"#,
        title = escape_html(ctx.title),
        action = escape_html(ctx.action),
        email = escape_html(email),
        error_block = error_block,
    )
}

fn render_dashboard(ctx: &PageContext<'_>) -> String {
    format!(
        r#"    <div id="dashboard-container">
        <form method="POST" action="{action}">
            <input type="hidden" name="action" value="logout">
            <button type="submit">Logout</button>
        </form>

        <iframe title="{title}" src="{src}" allowfullscreen="true"></iframe>
    </div>"#,
        action = escape_html(ctx.action),
        title = escape_html(ctx.title),
        src = escape_html(ctx.dashboard_url),
    )
}

pub const PAGE_CSS: &str = r#"
.authz-page {
    max-width: 56rem;
    margin: 2rem auto;
    padding: 0 1rem;
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    color: #0f172a;
}

.authz-page h1 {
    font-size: 1.4rem;
    margin-bottom: 1.25rem;
}

.payload-view {
    width: 100%;
    max-height: 60vh;
    overflow: auto;
    border: 1px solid #cbd5e1;
    border-radius: 6px;
    background: #f8fafc;
}

.payload-view pre {
    margin: 0;
    padding: 0.75rem 1rem;
    font-family: 'Menlo', 'Consolas', 'Monaco', monospace;
    font-size: 13px;
    line-height: 1.5;
    white-space: pre-wrap;
    word-break: break-word;
}

#authorize-button {
    margin-top: 1rem;
    padding: 0.5rem 1.5rem;
    font: inherit;
    font-weight: 600;
    color: #fff;
    background: #2563eb;
    border: none;
    border-radius: 6px;
    cursor: pointer;
}

#authorize-button:disabled {
    background: #94a3b8;
    cursor: progress;
}

.authz-status {
    margin-top: 1rem;
    color: #15803d;
}

.authz-error {
    margin-top: 1rem;
    color: #b91c1c;
}
"#;

//! 外部コマンド分類器
//!
//! 設定されたコマンドを起動し、チャンクをJSON配列としてstdinに渡して
//! stdoutの `[{"label": ..., "score": ...}]` をパースする。
//! 学習済みモデルを別プロセス（Pythonスクリプト等）で動かす場合に使う。

use sentiment_dashboard_common::{
    parse_classifier_response, ClassificationResult, Classifier, Error, Result,
};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

pub struct CommandClassifier {
    program: String,
    args: Vec<String>,
}

impl CommandClassifier {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn command(&self) -> Command {
        // Windowsではcmd /c経由
        #[cfg(windows)]
        let mut command = {
            let mut command = Command::new("cmd");
            command.arg("/c").arg(&self.program);
            command
        };

        #[cfg(not(windows))]
        let mut command = Command::new(&self.program);

        command.args(&self.args);
        command
    }

    fn run(&self, input: String) -> Result<String> {
        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Classifier(format!("分類コマンド起動エラー ({}): {}", self.program, e)))?;

        // 出力待ちと並行して書き込む（パイプ詰まり防止）
        let stdin = child.stdin.take();
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Classifier(format!("分類コマンド実行エラー: {}", e)))?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!("classifier closed stdin early");
            }
            Ok(Err(e)) => {
                return Err(Error::Classifier(format!("分類コマンドへの入力エラー: {}", e)));
            }
            Err(_) => {
                return Err(Error::Classifier("分類コマンドへの入力スレッドが異常終了しました".into()));
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Classifier(format!(
                "classifier command failed (code {:?}): {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        let preview: String = response.chars().take(200).collect();
        debug!(len = response.len(), %preview, "classifier response");

        Ok(response)
    }
}

impl Classifier for CommandClassifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        let payload = serde_json::to_string(texts)?;
        debug!(program = %self.program, count = texts.len(), "running classifier command");
        let response = self.run(payload)?;
        parse_classifier_response(&response, texts.len())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

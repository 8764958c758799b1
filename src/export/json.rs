use crate::error::Result;
use parfy_common::AnalysisResult;
use std::path::Path;

/// 解析結果をそのままJSONで保存
pub fn write_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 保存済みJSONを読み戻す
pub fn read_json(path: &Path) -> Result<AnalysisResult> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// プレゼンテーション層モジュール
///
/// コマンド結果とユーザー入力の橋渡しを行います。
///
/// # モジュール
/// - `input`: ユーザー入力処理（パスワード）
/// - `output`: コマンド結果とエラーの出力（人間向け・機械向け）
pub mod input;
pub mod output;

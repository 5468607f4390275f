//! 件数差異の説明文
//!
//! 実データは使わない固定の説明（7件・28件は例示の値）。

pub fn narrative() -> String {
    let lines = [
        "手作業では7件なのに、チャートのコイルが28件になるのはなぜか",
        "",
        "例: コイルに触れた保守記録を数えると7件だった。",
        "チャートが数えているのはレコード数ではなくキーワードの一致数なので、同じレコードが何度も数えられる。",
        "",
        "1. 重なり合うキーワード",
        "   Coils のキーワードは coil, coils, evaporator coil, condenser coil。",
        "   キーワードは1つずつ個別に照合され、最長一致の規則はない。",
        "   \"Clean evaporator coil\" は \"coil\" と \"evaporator coil\" の両方に一致 = 2件",
        "   \"Replace coils\" は \"coil\" と \"coils\" の両方に一致 = 2件",
        "",
        "2. 複数の検索列",
        "   列名が作業内容・説明らしい列はすべて検索される。",
        "   Action と Description の両方に \"coil\" があるレコードは列ごとに数えられる。",
        "",
        "3. 2回検索される列",
        "   \"Description\" のような列名は作業列のヒントにも説明列のヒントにも該当する。",
        "   そのため検索列に2回入り、その列の一致はすべて2回数えられる。",
        "",
        "1レコードでまとめると:",
        "   Action      = \"Clean evaporator coil\"       -> coil, evaporator coil  = 2",
        "   Description = \"Coil maintenance required\"  -> coil (2回検索)         = 2",
        "   1レコードで4件。",
        "",
        "7レコード x 約4件 = チャートの28件。",
        "",
        "手作業の7件はレコード数、チャートの28件は一致数。",
        "設備種別ごとに1レコード1件で数えるには `equipment-tally analyze --distinct` を使う。",
    ];

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

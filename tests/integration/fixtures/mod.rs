// Quest files in the layout FTB Quests writes them

/// A chapter file with two quests, a subtitle and a blank description line
pub const CHAPTER_BASICS: &str = r#"{
	default_hide_dependency_lines: false
	filename: "basics"
	group: ""
	icon: "minecraft:oak_log"
	id: "1A2B3C4D5E6F7081"
	order_index: 0
	quests: [
		{
			description: [
				"Punch a tree to get started."
				""
				"Logs can be crafted into planks."
			]
			id: "0F1E2D3C4B5A6978"
			subtitle: "Every journey begins with wood"
			tasks: [{
				id: "7766554433221100"
				item: "minecraft:oak_log"
				type: "item"
			}]
			title: "Getting Wood"
			x: 0.0d
			y: 0.0d
		}
		{
			dependencies: ["0F1E2D3C4B5A6978"]
			description: ["Craft a table." "Place it down."]
			id: "1122334455667788"
			title: "Crafting Table"
			x: 1.5d
			y: 0.0d
		}
	]
	title: "The Basics"
}
"#;

/// Shares "Getting Wood" with CHAPTER_BASICS and uses non-ASCII text
pub const CHAPTER_LOCALIZED: &str = r#"{
	filename: "localized"
	id: "99AABBCCDDEEFF00"
	quests: [
		{
			description: ["收集一些木头。"]
			id: "ABCDEF0123456789"
			title: "Getting Wood"
		}
	]
	title: "Überblick"
}
"#;

/// Structural data only, nothing to extract
pub const DATA_FILE: &str = r#"{
	default_autoclaim_rewards: "disabled"
	default_consume_items: false
	detection_delay: 20
	version: 13
}
"#;

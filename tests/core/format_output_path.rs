//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use webcloud::core::format_output_path;

    #[test]
    fn as_is() {
        let final_destination = format_output_path("/home/username/Pictures/website_wordcloud.png");

        assert_eq!(final_destination, "/home/username/Pictures/website_wordcloud.png");
    }

    #[test]
    fn substitute_timestamp() {
        let final_destination = format_output_path("/tmp/cloud-%timestamp%.png");

        assert!(final_destination.starts_with("/tmp/cloud-"));
        assert!(final_destination.ends_with(".png"));
        assert!(!final_destination.contains('%'));
    }

    #[test]
    fn substitute_timestamp_multi() {
        let final_destination = format_output_path("%timestamp%/%timestamp%.txt");
        let (directory, file_name) = final_destination.split_once('/').unwrap();

        assert_eq!(format!("{directory}.txt"), file_name);
    }

    #[test]
    fn timestamp_has_no_colons() {
        let final_destination = format_output_path("%timestamp%");

        assert!(!final_destination.contains(':'));
        assert!(final_destination.ends_with('Z'));
        assert_eq!(final_destination.matches('_').count(), 2);
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use webcloud::core::format_output_path;

    #[test]
    fn other_placeholders_are_kept() {
        let final_destination = format_output_path("%title%.png");

        assert_eq!(final_destination, "%title%.png");
    }
}

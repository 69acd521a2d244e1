mod moderation;
